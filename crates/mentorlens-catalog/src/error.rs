//! Catalog error types.

use mentorlens_common::EntityError;
use mentorlens_db::DbError;
use mentorlens_ranker::ScoringError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read dataset {path}: {source}")]
    DatasetIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dataset download failed: HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Dataset contains an invalid entity: {0}")]
    InvalidEntity(#[from] EntityError),

    #[error("Dataset fetch timed out after {millis} ms")]
    Timeout { millis: u128 },

    #[error("Storage error: {0}")]
    Db(#[from] DbError),

    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Not found: {0}")]
    NotFound(String),
}
