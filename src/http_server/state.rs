//! Shared handler state

use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::store::{DocumentStore, StorageError};

use super::errors::ApiResult;

/// Process-scoped handles passed to every handler.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    store: Option<Arc<dyn DocumentStore>>,
    database: DatabaseConfig,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn DocumentStore>>, database: DatabaseConfig) -> Self {
        Self { store, database }
    }

    /// State backed by `store` with no database settings recorded
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(Some(store), DatabaseConfig::default())
    }

    /// The document store, or `StorageError::Unavailable` when none was opened.
    pub fn store(&self) -> ApiResult<&dyn DocumentStore> {
        self.store
            .as_deref()
            .ok_or_else(|| StorageError::Unavailable.into())
    }

    pub fn database(&self) -> &DatabaseConfig {
        &self.database
    }
}
