use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EntityError {
    #[error("{entity} has an empty id")]
    EmptyId { entity: &'static str },

    #[error("{entity} {id}: missing required field `{field}`")]
    MissingField {
        entity: &'static str,
        id: String,
        field: &'static str,
    },

    #[error("{entity} {id}: field `{field}` out of range ({value})")]
    OutOfRange {
        entity: &'static str,
        id: String,
        field: &'static str,
        value: f64,
    },
}

pub type Result<T> = std::result::Result<T, EntityError>;
