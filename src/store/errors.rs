//! # Document Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StorageError>;

/// Document store errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// No store was configured or it could not be opened
    #[error("Document store not available")]
    Unavailable,

    #[error("Invalid collection name: '{0}'")]
    InvalidCollection(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::IoError(e.to_string())
    }
}
