//! Storage error types.

use mentorlens_ranker::ScoringError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored value under `{key}` is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage operation on `{key}` timed out after {millis} ms")]
    Timeout { key: String, millis: u128 },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid import: {0}")]
    InvalidImport(String),

    #[error("Invalid weights: {0}")]
    Weights(#[from] ScoringError),
}
