//! # In-Memory Backend

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::Utc;

use super::backend::{check_collection_name, stamp, DocumentStore};
use super::document::{Document, DocumentId};
use super::errors::{StorageError, StoreResult};

/// Process-local store. Documents are kept in insertion order.
#[derive(Debug)]
pub struct MemoryStore {
    name: String,
    collections: RwLock<BTreeMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(BTreeMap::new()),
        }
    }
}

fn poisoned() -> StorageError {
    StorageError::Internal("collection lock poisoned".to_string())
}

impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentId> {
        check_collection_name(collection)?;
        let (id, document) = stamp(document, Utc::now());

        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id)
    }

    fn find(
        &self,
        collection: &str,
        filter: &Document,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Document>> {
        check_collection_name(collection)?;

        let collections = self.collections.read().map_err(|_| poisoned())?;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .filter(|doc| doc.matches(filter))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    fn list_collections(&self) -> StoreResult<Vec<String>> {
        let collections = self.collections.read().map_err(|_| poisoned())?;
        Ok(collections
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect())
    }
}
