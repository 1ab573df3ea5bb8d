use mentorlens_common::EntityError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Invalid entity: {0}")]
    InvalidEntity(#[from] EntityError),

    #[error("{vector} weights sum to {sum}, expected 1.0")]
    WeightSum { vector: &'static str, sum: f64 },

    #[error("{vector} weight `{dimension}` is negative or not finite ({value})")]
    InvalidWeight {
        vector: &'static str,
        dimension: String,
        value: f64,
    },

    #[error("{vector} weights are missing dimension `{dimension}`")]
    MissingDimension {
        vector: &'static str,
        dimension: &'static str,
    },

    #[error("{vector} weights have unknown dimension `{dimension}`")]
    UnknownDimension { vector: &'static str, dimension: String },

    #[error("{vector} weights cannot be normalised: sum is {sum}")]
    Degenerate { vector: &'static str, sum: f64 },
}

pub type Result<T> = std::result::Result<T, ScoringError>;
