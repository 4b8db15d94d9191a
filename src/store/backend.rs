//! # Document Store Trait

use chrono::{DateTime, Utc};

use super::document::{
    DocValue, Document, DocumentId, CREATED_AT_FIELD, ID_FIELD, UPDATED_AT_FIELD,
};
use super::errors::{StorageError, StoreResult};

/// Backend trait for document persistence.
///
/// Each `insert` is atomic per document; nothing spans documents.
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Database name reported by diagnostics
    fn name(&self) -> &str;

    /// Whether timestamps can be stored as native temporal values. When
    /// false, callers embed ISO-8601 strings instead.
    fn supports_native_datetime(&self) -> bool {
        true
    }

    /// Persists a document and returns its new identifier.
    fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentId>;

    /// Returns up to `limit` documents matching `filter`, in the store's
    /// natural order.
    fn find(
        &self,
        collection: &str,
        filter: &Document,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Document>>;

    /// Names of collections holding at least one document, sorted
    fn list_collections(&self) -> StoreResult<Vec<String>>;
}

/// Collection names become file names, so keep them to a safe alphabet.
pub(crate) fn check_collection_name(collection: &str) -> StoreResult<()> {
    let valid = !collection.is_empty()
        && collection.len() <= 64
        && collection
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidCollection(collection.to_string()))
    }
}

/// Assigns a fresh identifier and the bookkeeping timestamps.
pub(crate) fn stamp(mut document: Document, now: DateTime<Utc>) -> (DocumentId, Document) {
    let id = DocumentId::generate();
    document.insert(ID_FIELD, DocValue::Id(id));
    document.insert(CREATED_AT_FIELD, now);
    document.insert(UPDATED_AT_FIELD, now);
    (id, document)
}
