//! # Analysis Module
//!
//! Pure operations over parsed frames: selecting particles, partitioning them into
//! layers, locating the boundary band between layers, and deriving new frames.
//!
//! ## Components
//!
//! - [`selector`] - Index-set queries by residue name, atom name or residue number
//! - [`partition`] - Layer splitting along an axis, residue expansion, boundary bands
//! - [`ops`] - Subset, removal, merge and translation of frames
//! - [`area`] - Box area and area-per-lipid series from XVG data
//! - [`config`] - Typed settings for the composed bilayer operations
//! - [`error`] - The error type shared by the fallible operations
//!
//! Index sets are plain `Vec<usize>` in ascending frame order. An empty selection is
//! a valid result, never an error.

pub mod area;
pub mod config;
pub mod error;
pub mod ops;
pub mod partition;
pub mod selector;
