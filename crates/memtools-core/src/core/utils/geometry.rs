use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A Cartesian coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    #[default]
    Z,
}

impl Axis {
    /// The position of this axis in an `(x, y, z)` triple.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Extracts the coordinate of `point` along this axis.
    pub fn component(self, point: &Point3<f64>) -> f64 {
        point[self.index()]
    }

    /// The unit vector pointing along this axis.
    pub fn unit_vector(self) -> Vector3<f64> {
        let mut v = Vector3::zeros();
        v[self.index()] = 1.0;
        v
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid axis '{0}' (expected x, y or z)")]
pub struct ParseAxisError(pub String);

impl FromStr for Axis {
    type Err = ParseAxisError;

    /// Parses an axis name (`x`, `y` or `z`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(ParseAxisError(s.to_string())),
        }
    }
}

/// Arithmetic mean of a sequence of values.
///
/// # Return
///
/// Returns `None` for an empty sequence.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Mean coordinate of `points` along `axis`, or `None` when `points` is empty.
pub fn mean_along<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>, axis: Axis) -> Option<f64> {
    mean(points.into_iter().map(|p| axis.component(p)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_index_and_component_agree() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::X.component(&p), 1.0);
        assert_eq!(Axis::Y.component(&p), 2.0);
        assert_eq!(Axis::Z.component(&p), 3.0);
        assert_eq!(Axis::Z.index(), 2);
    }

    #[test]
    fn unit_vector_points_along_axis() {
        assert_eq!(Axis::X.unit_vector(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(Axis::Y.unit_vector(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(Axis::Z.unit_vector(), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!(Axis::from_str("x"), Ok(Axis::X));
        assert_eq!(Axis::from_str("Y"), Ok(Axis::Y));
        assert_eq!(Axis::from_str(" z "), Ok(Axis::Z));
        assert_eq!(Axis::from_str("w"), Err(ParseAxisError("w".into())));
        assert_eq!(Axis::from_str(""), Err(ParseAxisError(String::new())));
    }

    #[test]
    fn parse_axis_error_names_the_rejected_value() {
        let err = "north".parse::<Axis>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid axis 'north' (expected x, y or z)");
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            assert_eq!(Axis::from_str(&axis.to_string()), Ok(axis));
        }
    }

    #[test]
    fn default_axis_is_z() {
        assert_eq!(Axis::default(), Axis::Z);
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(mean([1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(mean(std::iter::empty::<f64>()), None);
    }

    #[test]
    fn mean_along_uses_selected_axis() {
        let points = [Point3::new(0.0, 1.0, 10.0), Point3::new(2.0, 3.0, 20.0)];
        assert_eq!(mean_along(&points, Axis::X), Some(1.0));
        assert_eq!(mean_along(&points, Axis::Y), Some(2.0));
        assert_eq!(mean_along(&points, Axis::Z), Some(15.0));
        assert_eq!(mean_along(&Vec::<Point3<f64>>::new(), Axis::Z), None);
    }
}
