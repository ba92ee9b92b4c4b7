//! # memtools Core Library
//!
//! A library for reading, writing and partitioning GROMACS GRO configurations of
//! lipid bilayers and other layered particle systems.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a one-way dependency between them.
//!
//! - **[`core`]: The Foundation.** Immutable data models (`Frame`, `Particle`,
//!   `SimulationBox`), the GRO and XVG codecs, and small geometric helpers.
//!
//! - **[`analysis`]: The Logic Layer.** Pure selection queries, layer partitioning,
//!   boundary-band detection and frame-deriving operations (subset, merge, translate),
//!   together with the typed configuration that drives the composed operations.
//!
//! Every operation in [`analysis`] takes frames by reference and returns new values;
//! nothing mutates a parsed frame in place.

pub mod analysis;
pub mod core;
