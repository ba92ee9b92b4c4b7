use super::config::{BoundarySelection, LayerSelection};
use super::error::AnalysisError;
use super::selector::{
    atoms_named, by_atom_name, by_residue_name, by_residue_numbers, particle_at,
    residue_numbers_of,
};
use crate::core::models::frame::Frame;
use crate::core::utils::geometry::{Axis, mean_along};
use nalgebra::Point3;
use tracing::{debug, info, instrument, warn};

/// The two groups produced by a layer split.
///
/// Depending on the caller, the indices refer either to the positions slice given to
/// [`split_by_axis`] or to the particles of a frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerSplit {
    /// Members with a coordinate at or above the mean.
    pub upper: Vec<usize>,
    /// Members with a coordinate strictly below the mean.
    pub lower: Vec<usize>,
}

/// The coordinate interval separating the representative means of two layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub low: f64,
    pub high: f64,
}

impl Boundary {
    /// Builds a boundary from two layer positions given in any order.
    pub fn between(a: f64, b: f64) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// Returns `true` if `value` lies in the open interval `(low, high)`.
    pub fn contains_strictly(&self, value: f64) -> bool {
        self.low < value && value < self.high
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

/// Solvent flagged as lying inside a bilayer's boundary band.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolventSelection {
    /// The boundary band, or `None` if no band could be determined.
    pub boundary: Option<Boundary>,
    /// Indices of the representative solvent atoms strictly inside the band.
    pub molecules: Vec<usize>,
    /// Indices of every atom belonging to the flagged solvent residues.
    pub atoms: Vec<usize>,
}

/// Splits a set of positions into two groups along `axis`.
///
/// Positions whose coordinate is greater than or equal to the mean coordinate go to
/// `upper`, the rest to `lower`. A position exactly at the mean therefore always lands
/// in `upper`. The returned indices refer to `positions`; an empty slice gives two
/// empty groups.
pub fn split_by_axis(positions: &[Point3<f64>], axis: Axis) -> LayerSplit {
    let Some(center) = mean_along(positions, axis) else {
        return LayerSplit::default();
    };
    let (upper, lower): (Vec<usize>, Vec<usize>) =
        (0..positions.len()).partition(|&i| axis.component(&positions[i]) >= center);
    LayerSplit { upper, lower }
}

/// Expands representative atoms to every atom of their residues.
///
/// Returns all particle indices whose residue number matches that of any seed, in
/// ascending order.
///
/// # Errors
///
/// Returns [`AnalysisError::IndexOutOfRange`] if any seed lies outside the frame.
pub fn expand_to_residues(frame: &Frame, seeds: &[usize]) -> Result<Vec<usize>, AnalysisError> {
    let numbers = residue_numbers_of(frame, seeds)?;
    Ok(by_residue_numbers(frame, &numbers))
}

/// Splits head-group atoms into two layers and expands both layers to full residues.
///
/// # Arguments
///
/// * `frame` - The frame the head indices belong to.
/// * `heads` - One representative atom per residue.
/// * `axis` - The layer normal.
///
/// # Return
///
/// The frame indices of all atoms in the upper and lower layer.
///
/// # Errors
///
/// Returns [`AnalysisError::IndexOutOfRange`] if any head index lies outside the frame.
pub fn split_layers(frame: &Frame, heads: &[usize], axis: Axis) -> Result<LayerSplit, AnalysisError> {
    let positions = heads
        .iter()
        .map(|&i| particle_at(frame, i).map(|p| p.position))
        .collect::<Result<Vec<_>, _>>()?;
    let split = split_by_axis(&positions, axis);

    let upper_heads: Vec<usize> = split.upper.iter().map(|&k| heads[k]).collect();
    let lower_heads: Vec<usize> = split.lower.iter().map(|&k| heads[k]).collect();
    info!(
        "Residues in upper layer: {}, lower layer: {}",
        upper_heads.len(),
        lower_heads.len()
    );

    Ok(LayerSplit {
        upper: expand_to_residues(frame, &upper_heads)?,
        lower: expand_to_residues(frame, &lower_heads)?,
    })
}

/// Computes the boundary band between the two layers formed by atoms named `atom_name`.
///
/// The atoms are split along `axis` exactly as [`split_by_axis`] does, and the band
/// spans the mean coordinates of the two halves.
///
/// # Return
///
/// Returns `None` if either half is empty, i.e. when no atom matches or all matching
/// atoms share the same coordinate.
pub fn boundary_of(frame: &Frame, axis: Axis, atom_name: &str) -> Option<Boundary> {
    let positions: Vec<Point3<f64>> = atoms_named(frame, atom_name)
        .into_iter()
        .filter_map(|i| frame.particle(i))
        .map(|p| p.position)
        .collect();
    let split = split_by_axis(&positions, axis);

    let upper = mean_along(split.upper.iter().map(|&k| &positions[k]), axis);
    let lower = mean_along(split.lower.iter().map(|&k| &positions[k]), axis);
    match (upper, lower) {
        (Some(upper), Some(lower)) => {
            let boundary = Boundary::between(upper, lower);
            debug!(
                "Boundary of '{}' along {}: [{}, {}]",
                atom_name, axis, boundary.low, boundary.high
            );
            Some(boundary)
        }
        _ => {
            debug!(
                "No boundary for '{}' along {}: {} atom(s) do not form two layers",
                atom_name,
                axis,
                positions.len()
            );
            None
        }
    }
}

/// Indices of atoms named `atom_name` whose coordinate lies strictly inside `bounds`.
pub fn select_within(frame: &Frame, bounds: &Boundary, axis: Axis, atom_name: &str) -> Vec<usize> {
    atoms_named(frame, atom_name)
        .into_iter()
        .filter(|&i| {
            frame
                .particle(i)
                .is_some_and(|p| bounds.contains_strictly(axis.component(&p.position)))
        })
        .collect()
}

/// Splits the bilayer described by `selection` into its two leaflets.
///
/// The lipids are selected by residue name, reduced to one head-group atom each,
/// split along the configured axis, and each side is expanded back to whole lipids.
///
/// # Errors
///
/// Propagates [`AnalysisError`] from [`split_layers`].
#[instrument(skip_all, name = "split_bilayer", fields(residue = %selection.residue_name))]
pub fn split_bilayer(frame: &Frame, selection: &LayerSelection) -> Result<LayerSplit, AnalysisError> {
    let lipids = by_residue_name(frame, &selection.residue_name);
    let heads = by_atom_name(frame, &lipids, &selection.head_atom);
    if heads.is_empty() {
        warn!(
            "No '{}' atoms found in '{}' residues; both layers are empty.",
            selection.head_atom, selection.residue_name
        );
    }
    split_layers(frame, &heads, selection.axis)
}

/// Finds the solvent molecules sitting inside the bilayer's boundary band.
///
/// # Errors
///
/// Propagates [`AnalysisError`] from [`expand_to_residues`].
#[instrument(skip_all, name = "solvent_in_boundary", fields(solvent = %selection.solvent_atom))]
pub fn solvent_in_boundary(
    frame: &Frame,
    selection: &BoundarySelection,
) -> Result<SolventSelection, AnalysisError> {
    let Some(boundary) = boundary_of(frame, selection.axis, &selection.layer_atom) else {
        warn!(
            "Could not determine a boundary from '{}' atoms; no solvent selected.",
            selection.layer_atom
        );
        return Ok(SolventSelection::default());
    };

    let molecules = select_within(frame, &boundary, selection.axis, &selection.solvent_atom);
    let atoms = expand_to_residues(frame, &molecules)?;
    info!(
        "Solvent inside boundary: {} molecule(s), {} atom(s)",
        molecules.len(),
        atoms.len()
    );

    Ok(SolventSelection {
        boundary: Some(boundary),
        molecules,
        atoms,
    })
}
