use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    #[error("Particle index {index} is out of range for a frame of {len} particle(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Cannot merge an empty list of frames")]
    InvalidMerge,

    #[error("Required data column '{0}' is missing")]
    MissingColumn(String),

    #[error("Number of lipids must be positive")]
    InvalidLipidCount,
}
