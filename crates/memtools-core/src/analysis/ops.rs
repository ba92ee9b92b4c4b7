//! Operations deriving new frames from existing ones.
//!
//! None of these functions modify their inputs; each returns a freshly built [`Frame`].

use super::error::AnalysisError;
use super::selector::particle_at;
use crate::core::models::frame::Frame;
use crate::core::utils::geometry::Axis;
use std::collections::HashSet;
use tracing::debug;

/// Builds a frame holding only the particles at `keep`, in the order given.
///
/// The box is copied unchanged and the title line is replaced by `header`.
///
/// # Errors
///
/// Returns [`AnalysisError::IndexOutOfRange`] if any index lies outside `frame`. Indices
/// must come from selections made on the same frame.
pub fn subset(frame: &Frame, keep: &[usize], header: &str) -> Result<Frame, AnalysisError> {
    let particles = keep
        .iter()
        .map(|&i| particle_at(frame, i).cloned())
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Extracted {} of {} particle(s)", particles.len(), frame.len());
    Ok(Frame::new(header, *frame.sim_box(), particles))
}

/// Builds a frame without the particles at `drop`, keeping the order of the rest.
///
/// Indices in `drop` that lie outside the frame have nothing to remove and are ignored.
pub fn remove(frame: &Frame, drop: &[usize], header: &str) -> Frame {
    let drop: HashSet<usize> = drop.iter().copied().collect();
    let particles: Vec<_> = frame
        .particles()
        .iter()
        .enumerate()
        .filter(|(i, _)| !drop.contains(i))
        .map(|(_, p)| p.clone())
        .collect();
    debug!(
        "Removed {} particle(s), {} remain",
        frame.len() - particles.len(),
        particles.len()
    );
    Frame::new(header, *frame.sim_box(), particles)
}

/// Concatenates the particles of `frames` in argument order.
///
/// The merged frame takes the box of the first frame and the title line `header`.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidMerge`] if `frames` is empty.
pub fn merge(frames: &[Frame], header: &str) -> Result<Frame, AnalysisError> {
    let first = frames.first().ok_or(AnalysisError::InvalidMerge)?;
    let total = frames.iter().map(Frame::len).sum();
    let mut particles = Vec::with_capacity(total);
    for frame in frames {
        particles.extend_from_slice(frame.particles());
    }
    debug!("Merged {} frame(s) into {} particle(s)", frames.len(), total);
    Ok(Frame::new(header, *first.sim_box(), particles))
}

/// Shifts every particle of `frame` by `delta` along `axis`.
///
/// Title line, box and velocities are kept.
pub fn translate(frame: &Frame, axis: Axis, delta: f64) -> Frame {
    let shift = axis.unit_vector() * delta;
    frame.map_particles(|mut p| {
        p.position += shift;
        p
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::particle::Particle;
    use crate::core::models::simulation_box::SimulationBox;
    use nalgebra::{Point3, Vector3};

    fn numbered_frame(header: &str, first_residue: isize, count: usize, sim_box: SimulationBox) -> Frame {
        let particles = (0..count)
            .map(|i| {
                Particle::new(
                    first_residue + i as isize,
                    "LIP",
                    "P",
                    i + 1,
                    Point3::new(i as f64, 0.5, 1.0 + i as f64),
                )
            })
            .collect();
        Frame::new(header, sim_box, particles)
    }

    fn cube(edge: f64) -> SimulationBox {
        SimulationBox::rectangular(edge, edge, edge)
    }

    fn residue_numbers(frame: &Frame) -> Vec<isize> {
        frame.particles().iter().map(|p| p.residue_number).collect()
    }

    #[test]
    fn subset_keeps_requested_particles_in_given_order() {
        let frame = numbered_frame("Source", 1, 5, cube(4.0));
        let sub = subset(&frame, &[3, 0, 4], "Extracted").unwrap();

        assert_eq!(sub.header(), "Extracted");
        assert_eq!(sub.sim_box(), frame.sim_box());
        assert_eq!(residue_numbers(&sub), vec![4, 1, 5]);
    }

    #[test]
    fn subset_with_no_indices_is_empty() {
        let frame = numbered_frame("Source", 1, 3, cube(4.0));
        assert!(subset(&frame, &[], "Empty").unwrap().is_empty());
    }

    #[test]
    fn subset_rejects_out_of_range_index() {
        let frame = numbered_frame("Source", 1, 3, cube(4.0));
        assert_eq!(
            subset(&frame, &[0, 3], "Bad"),
            Err(AnalysisError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn subset_of_subset_equals_composed_subset() {
        let frame = numbered_frame("Source", 1, 8, cube(4.0));
        let outer = [1, 3, 5, 6, 7];
        let inner = [4, 0, 2];
        let composed: Vec<usize> = inner.iter().map(|&i| outer[i]).collect();

        let twice = subset(&subset(&frame, &outer, "A").unwrap(), &inner, "B").unwrap();
        let once = subset(&frame, &composed, "B").unwrap();
        assert_eq!(twice, once);
    }

    #[test]
    fn subset_does_not_modify_source() {
        let frame = numbered_frame("Source", 1, 3, cube(4.0));
        let copy = frame.clone();
        let _ = subset(&frame, &[1], "Sub").unwrap();
        assert_eq!(frame, copy);
    }

    #[test]
    fn remove_drops_listed_particles() {
        let frame = numbered_frame("Source", 1, 5, cube(4.0));
        let removed = remove(&frame, &[1, 3, 99], "Removed.");

        assert_eq!(removed.header(), "Removed.");
        assert_eq!(residue_numbers(&removed), vec![1, 3, 5]);
        assert_eq!(removed.sim_box(), frame.sim_box());
    }

    #[test]
    fn remove_nothing_keeps_everything() {
        let frame = numbered_frame("Source", 1, 4, cube(4.0));
        let removed = remove(&frame, &[], "Same");
        assert_eq!(removed.particles(), frame.particles());
    }

    #[test]
    fn merge_concatenates_in_argument_order() {
        let a = numbered_frame("A", 1, 2, cube(4.0));
        let b = numbered_frame("B", 10, 3, cube(5.0));
        let c = numbered_frame("C", 20, 1, cube(6.0));

        let merged = merge(&[a.clone(), b.clone(), c.clone()], "Merged.").unwrap();

        let expected: Vec<Particle> = [a.particles(), b.particles(), c.particles()].concat();
        assert_eq!(merged.particles(), expected.as_slice());
        assert_eq!(merged.header(), "Merged.");
        assert_eq!(merged.sim_box(), &cube(4.0));
    }

    #[test]
    fn merge_of_single_frame_copies_particles() {
        let a = numbered_frame("A", 1, 2, cube(4.0));
        let merged = merge(std::slice::from_ref(&a), "Copy").unwrap();
        assert_eq!(merged.particles(), a.particles());
    }

    #[test]
    fn merge_of_no_frames_is_invalid() {
        assert_eq!(merge(&[], "Nothing"), Err(AnalysisError::InvalidMerge));
    }

    #[test]
    fn translate_shifts_only_selected_axis() {
        let frame = numbered_frame("Layer", 1, 2, cube(4.0));
        let moved = translate(&frame, Axis::Z, 1.5);

        for (before, after) in frame.particles().iter().zip(moved.particles()) {
            assert_eq!(after.position.x, before.position.x);
            assert_eq!(after.position.y, before.position.y);
            assert_eq!(after.position.z, before.position.z + 1.5);
        }
        assert_eq!(moved.header(), frame.header());
        assert_eq!(moved.sim_box(), frame.sim_box());
    }

    #[test]
    fn translate_back_and_forth_restores_positions() {
        let frame = numbered_frame("Layer", 1, 3, cube(4.0));
        let restored = translate(&translate(&frame, Axis::X, -0.25), Axis::X, 0.25);
        assert_eq!(restored, frame);
    }

    #[test]
    fn translate_keeps_velocities() {
        let frame = numbered_frame("Layer", 1, 1, cube(4.0)).with_zero_velocities();
        let moved = translate(&frame, Axis::Y, 2.0);
        assert_eq!(moved.particle(0).unwrap().velocity, Some(Vector3::zeros()));
    }
}
