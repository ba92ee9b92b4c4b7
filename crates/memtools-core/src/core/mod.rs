//! # Core Module
//!
//! The foundation of the library: data models for molecular configurations, file
//! codecs, and geometric utilities shared by the analysis layer.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Particles, frames and simulation boxes
//! - **File I/O** ([`io`]) - The GRO configuration codec and the XVG time-series reader
//! - **Utilities** ([`utils`]) - Coordinate axes and averaging helpers
//!
//! Frames are created only by parsing or by the frame-deriving operations in
//! [`crate::analysis::ops`], and are immutable once constructed.

pub mod io;
pub mod models;
pub mod utils;
