//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence and structural-validation errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// No schema stored under the requested id
    #[error("Form '{0}' not found")]
    NotFound(String),

    /// Schema failed structural validation at save time
    #[error("Invalid form schema: {0}")]
    InvalidSchema(String),

    /// A schema file exists but cannot be parsed
    #[error("Malformed form file '{path}': {reason}")]
    Malformed { path: String, reason: String },

    /// Underlying filesystem failure
    #[error("Store I/O failure at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization failure
    #[error("Serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}
