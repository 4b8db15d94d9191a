//! # Local Filesystem Backend
//!
//! One append-only JSON-lines file per collection:
//! `<root>/<collection>.jsonl`.
//!
//! A line that fails to decode (for example the tail of an interrupted
//! append) is logged and skipped by readers. Writers start a fresh line
//! when the file does not end in a newline.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use tracing::warn;

use super::backend::{check_collection_name, stamp, DocumentStore};
use super::codec::{decode_line, encode_line};
use super::document::{Document, DocumentId};
use super::errors::{StorageError, StoreResult};

const EXTENSION: &str = "jsonl";

/// Filesystem-backed store rooted at one directory per database.
#[derive(Debug)]
pub struct FileStore {
    name: String,
    root: PathBuf,
    // Serializes appends so each line is written whole.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens (creating if needed) the database directory `root`.
    pub fn open(name: impl Into<String>, root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            name: name.into(),
            root,
            write_lock: Mutex::new(()),
        })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{}.{}", collection, EXTENSION))
    }
}

impl DocumentStore for FileStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentId> {
        check_collection_name(collection)?;
        let (id, document) = stamp(document, Utc::now());

        let mut line = encode_line(&document).map_err(|e| StorageError::Encode(e.to_string()))?;
        line.push('\n');

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Internal("write lock poisoned".to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(self.collection_path(collection))?;
        if !ends_with_newline(&mut file)? {
            warn!(collection, "repairing unterminated last line");
            line.insert(0, '\n');
        }
        file.write_all(line.as_bytes())?;
        file.flush()?;

        Ok(id)
    }

    fn find(
        &self,
        collection: &str,
        filter: &Document,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Document>> {
        check_collection_name(collection)?;
        let limit = limit.unwrap_or(usize::MAX);

        let file = match File::open(self.collection_path(collection)) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut results = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            if results.len() >= limit {
                break;
            }
            let line = match line {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    warn!(collection, line = index + 1, "skipping non UTF-8 line");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if line.trim().is_empty() {
                continue;
            }
            let document = match decode_line(&line) {
                Ok(document) => document,
                Err(reason) => {
                    warn!(collection, line = index + 1, %reason, "skipping undecodable line");
                    continue;
                }
            };
            if document.matches(filter) {
                results.push(document);
            }
        }

        Ok(results)
    }

    fn list_collections(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().map_or(true, |ext| ext != EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// True for an empty file or one whose last byte is `\n`.
fn ends_with_newline(file: &mut File) -> StoreResult<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
