//! # Document Store
//!
//! Narrow persistence interface used by the request handlers:
//! `insert(collection, document) -> id` and
//! `find(collection, filter, limit) -> documents`.
//!
//! Backends:
//! - `memory://` - process-local, lost on exit
//! - `file://<dir>` or a bare path - JSON-lines files under `<dir>/<name>/`

mod backend;
mod codec;
pub mod document;
mod errors;
mod file;
mod memory;

use std::path::PathBuf;
use std::sync::Arc;

pub use backend::DocumentStore;
pub use document::{DocValue, Document, DocumentId};
pub use errors::{StorageError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;

const MEMORY_SCHEME: &str = "memory://";
const FILE_SCHEME: &str = "file://";

/// Where a database URL points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Memory,
    Directory(PathBuf),
}

impl StoreLocation {
    /// Parses a database URL.
    pub fn parse(url: &str) -> StoreResult<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(StorageError::Unavailable);
        }
        if url == MEMORY_SCHEME || url == "memory" {
            return Ok(StoreLocation::Memory);
        }
        let path = url.strip_prefix(FILE_SCHEME).unwrap_or(url);
        if path.is_empty() || path.contains("://") {
            return Err(StorageError::Internal(format!(
                "unsupported database url '{}'",
                url
            )));
        }
        Ok(StoreLocation::Directory(PathBuf::from(path)))
    }
}

/// Opens the store named by `url` for database `name`.
///
/// Called once at start-up; the handle is then shared read-only.
pub fn open(url: &str, name: &str) -> StoreResult<Arc<dyn DocumentStore>> {
    match StoreLocation::parse(url)? {
        StoreLocation::Memory => Ok(Arc::new(MemoryStore::new(name))),
        StoreLocation::Directory(dir) => Ok(Arc::new(FileStore::open(name, dir.join(name))?)),
    }
}
