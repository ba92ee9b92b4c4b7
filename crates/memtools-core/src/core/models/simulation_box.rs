/// The periodic simulation box of a frame, as declared on the box line of a GRO file.
///
/// The values keep the order in which they appear in the file. For a triclinic box
/// that order is `v1(x) v2(y) v3(z) v1(y) v1(z) v2(x) v2(z) v3(x) v3(y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulationBox {
    /// An orthogonal box given by its three edge lengths.
    Rectangular([f64; 3]),
    /// A general box given by the nine components of its three box vectors.
    Triclinic([f64; 9]),
}

impl SimulationBox {
    pub fn rectangular(x: f64, y: f64, z: f64) -> Self {
        SimulationBox::Rectangular([x, y, z])
    }

    /// Builds a box from the numbers found on a box line.
    ///
    /// # Return
    ///
    /// Returns `None` unless exactly 3 or 9 values are given.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        match values.len() {
            3 => Some(SimulationBox::Rectangular([values[0], values[1], values[2]])),
            9 => {
                let mut v = [0.0; 9];
                v.copy_from_slice(values);
                Some(SimulationBox::Triclinic(v))
            }
            _ => None,
        }
    }

    /// The box numbers in file order.
    pub fn values(&self) -> &[f64] {
        match self {
            SimulationBox::Rectangular(v) => v,
            SimulationBox::Triclinic(v) => v,
        }
    }

    /// The diagonal of the box matrix (`v1(x)`, `v2(y)`, `v3(z)`).
    pub fn diagonal(&self) -> [f64; 3] {
        let v = self.values();
        [v[0], v[1], v[2]]
    }

    /// The area of the box cross-section in the xy plane.
    ///
    /// GROMACS keeps `v1` along x and `v2` in the xy plane, so the area is `v1(x) * v2(y)`
    /// for both box kinds.
    pub fn xy_area(&self) -> f64 {
        let [x, y, _] = self.diagonal();
        x * y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_accepts_three_or_nine_numbers() {
        assert_eq!(
            SimulationBox::from_values(&[1.0, 2.0, 3.0]),
            Some(SimulationBox::Rectangular([1.0, 2.0, 3.0]))
        );
        let nine = [1.0, 2.0, 3.0, 0.0, 0.0, 0.5, 0.0, 0.25, 0.0];
        assert_eq!(
            SimulationBox::from_values(&nine),
            Some(SimulationBox::Triclinic(nine))
        );
    }

    #[test]
    fn from_values_rejects_other_lengths() {
        assert_eq!(SimulationBox::from_values(&[]), None);
        assert_eq!(SimulationBox::from_values(&[1.0, 2.0]), None);
        assert_eq!(SimulationBox::from_values(&[1.0; 6]), None);
    }

    #[test]
    fn values_preserve_file_order() {
        let nine = [9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let sim_box = SimulationBox::Triclinic(nine);
        assert_eq!(sim_box.values(), &nine);
        assert_eq!(sim_box.diagonal(), [9.0, 8.0, 7.0]);
    }

    #[test]
    fn xy_area_multiplies_first_two_diagonal_entries() {
        assert_eq!(SimulationBox::rectangular(6.0, 7.0, 10.0).xy_area(), 42.0);
        let tric = SimulationBox::Triclinic([6.0, 7.0, 10.0, 0.0, 0.0, 3.0, 0.0, 1.0, 1.0]);
        assert_eq!(tric.xy_area(), 42.0);
    }
}
