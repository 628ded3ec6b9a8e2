//! Error types for agenda.

use thiserror::Error;

/// Errors that can occur in agenda operations.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document on disk does not have the expected shape.
    #[error("Invalid database document: {0}")]
    Schema(String),

    #[error("Table '{0}' does not exist")]
    UnknownTable(String),

    #[error("Registro no encontrado")]
    NotFound,

    /// A business rule rejected the request. The message is user facing.
    #[error("{0}")]
    Validation(String),

    #[error("Got {fields} fields but {values} values")]
    FieldMismatch { fields: usize, values: usize },
}

impl AgendaError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        AgendaError::Validation(msg.into())
    }
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
