//! Small geometric helpers shared by the codec and the analysis layer.

pub mod geometry;
