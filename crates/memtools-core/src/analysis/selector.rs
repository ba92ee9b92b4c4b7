//! Index-set queries over the particles of a frame.
//!
//! Every query returns indices in ascending frame order and never fails on an empty
//! result.

use super::error::AnalysisError;
use crate::core::models::frame::Frame;
use crate::core::models::particle::Particle;
use std::collections::HashSet;
use tracing::trace;

/// Indices of particles whose residue name equals `name`.
pub fn by_residue_name(frame: &Frame, name: &str) -> Vec<usize> {
    select(frame, |p| p.residue_name == name)
}

/// Indices of particles whose atom name equals `name`.
pub fn atoms_named(frame: &Frame, name: &str) -> Vec<usize> {
    select(frame, |p| p.atom_name == name)
}

/// Restricts `indices` to the particles whose atom name equals `name`.
///
/// The relative order of `indices` is kept. Indices outside the frame are ignored.
pub fn by_atom_name(frame: &Frame, indices: &[usize], name: &str) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .filter(|&i| frame.particle(i).is_some_and(|p| p.atom_name == name))
        .collect()
}

/// Indices of particles whose residue number is one of `numbers`.
///
/// Residue numbers wrap in the file format and are therefore not globally unique.
/// Callers must derive `numbers` from a coherent subset of the same frame, e.g. with
/// [`residue_numbers_of`], before using this query.
pub fn by_residue_numbers(frame: &Frame, numbers: &HashSet<isize>) -> Vec<usize> {
    if numbers.is_empty() {
        return Vec::new();
    }
    select(frame, |p| numbers.contains(&p.residue_number))
}

/// The residue numbers carried by the particles at `indices`.
///
/// # Errors
///
/// Returns [`AnalysisError::IndexOutOfRange`] if any index is outside the frame.
pub fn residue_numbers_of(frame: &Frame, indices: &[usize]) -> Result<HashSet<isize>, AnalysisError> {
    indices
        .iter()
        .map(|&i| particle_at(frame, i).map(|p| p.residue_number))
        .collect()
}

pub(crate) fn particle_at(frame: &Frame, index: usize) -> Result<&Particle, AnalysisError> {
    frame.particle(index).ok_or(AnalysisError::IndexOutOfRange {
        index,
        len: frame.len(),
    })
}

fn select(frame: &Frame, predicate: impl Fn(&Particle) -> bool) -> Vec<usize> {
    let selected: Vec<usize> = frame
        .particles()
        .iter()
        .enumerate()
        .filter(|(_, p)| predicate(*p))
        .map(|(i, _)| i)
        .collect();
    trace!("Selected {} of {} particle(s)", selected.len(), frame.len());
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::simulation_box::SimulationBox;
    use nalgebra::Point3;

    fn membrane_frame() -> Frame {
        let records = [
            (1, "POPC", "P"),
            (1, "POPC", "C1"),
            (2, "SOL", "OW"),
            (2, "SOL", "HW1"),
            (3, "POPC", "P"),
            (3, "POPC", "C1"),
        ];
        let particles = records
            .iter()
            .enumerate()
            .map(|(i, &(resnr, resname, name))| {
                Particle::new(resnr, resname, name, i + 1, Point3::new(0.0, 0.0, i as f64))
            })
            .collect();
        Frame::new("Membrane", SimulationBox::rectangular(3.0, 3.0, 6.0), particles)
    }

    #[test]
    fn by_residue_name_returns_ascending_indices() {
        let frame = membrane_frame();
        assert_eq!(by_residue_name(&frame, "POPC"), vec![0, 1, 4, 5]);
        assert_eq!(by_residue_name(&frame, "SOL"), vec![2, 3]);
    }

    #[test]
    fn by_residue_name_returns_empty_for_unknown_name() {
        assert!(by_residue_name(&membrane_frame(), "DPPC").is_empty());
    }

    #[test]
    fn atoms_named_searches_whole_frame() {
        let frame = membrane_frame();
        assert_eq!(atoms_named(&frame, "P"), vec![0, 4]);
        assert_eq!(atoms_named(&frame, "OW"), vec![2]);
        assert!(atoms_named(&frame, "NA").is_empty());
    }

    #[test]
    fn by_atom_name_restricts_given_indices() {
        let frame = membrane_frame();
        let lipids = by_residue_name(&frame, "POPC");
        assert_eq!(by_atom_name(&frame, &lipids, "P"), vec![0, 4]);
        assert_eq!(by_atom_name(&frame, &[1, 2, 3], "P"), Vec::<usize>::new());
    }

    #[test]
    fn by_atom_name_ignores_out_of_range_indices() {
        let frame = membrane_frame();
        assert_eq!(by_atom_name(&frame, &[0, 42], "P"), vec![0]);
    }

    #[test]
    fn by_residue_numbers_selects_every_atom_of_the_residues() {
        let frame = membrane_frame();
        let numbers: HashSet<isize> = [1, 3].into_iter().collect();
        assert_eq!(by_residue_numbers(&frame, &numbers), vec![0, 1, 4, 5]);
        assert!(by_residue_numbers(&frame, &HashSet::new()).is_empty());
    }

    #[test]
    fn residue_numbers_of_collects_distinct_numbers() {
        let frame = membrane_frame();
        let numbers = residue_numbers_of(&frame, &[0, 1, 2]).unwrap();
        assert_eq!(numbers, HashSet::from([1, 2]));
    }

    #[test]
    fn residue_numbers_of_rejects_out_of_range_index() {
        let frame = membrane_frame();
        assert_eq!(
            residue_numbers_of(&frame, &[0, 6]),
            Err(AnalysisError::IndexOutOfRange { index: 6, len: 6 })
        );
    }
}
