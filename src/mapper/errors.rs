//! # Mapping Errors

use thiserror::Error;

use crate::schema::ValidationError;

/// Result type for mapper operations
pub type MappingResult<T> = Result<T, MappingError>;

/// A record could not be translated to or from a document
#[derive(Debug, Clone, Error)]
pub enum MappingError {
    /// A stored document does not satisfy the record schema
    #[error("Document {id} in '{collection}' does not match its schema: {source}")]
    InvalidDocument {
        collection: &'static str,
        id: String,
        #[source]
        source: ValidationError,
    },

    /// A record could not be serialized into document form
    #[error("Failed to encode {collection} record: {reason}")]
    Encode {
        collection: &'static str,
        reason: String,
    },
}

impl MappingError {
    /// The schema violations behind an inbound failure
    pub fn violations(&self) -> Option<&ValidationError> {
        match self {
            MappingError::InvalidDocument { source, .. } => Some(source),
            MappingError::Encode { .. } => None,
        }
    }
}
