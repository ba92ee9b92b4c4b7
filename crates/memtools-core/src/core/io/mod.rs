//! Provides input/output functionality for molecular-dynamics text formats.
//!
//! [`gro`] reads and writes GROMACS GRO configurations (single frames or multi-frame
//! trajectories) through the [`traits::TrajectoryFile`] interface. [`xvg`] reads the
//! GROMACS XVG time-series files produced by the energy and box analysis tools.

pub mod gro;
pub mod traits;
pub mod xvg;
