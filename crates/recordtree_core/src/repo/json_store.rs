//! JSON-file tree store.
//!
//! # Invariants
//! - The file holds one JSON array of records in the stored layout.
//! - Save rewrites the whole file; there is no partial update path.

use crate::model::record::{Record, Tree};
use crate::repo::tree_store::{decode_document, encode_document, StoreError, StoreResult, TreeStore};
use log::{error, info};
use std::path::{Path, PathBuf};

/// Tree store backed by a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileTreeStore {
    path: PathBuf,
}

impl JsonFileTreeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TreeStore for JsonFileTreeStore {
    fn load(&self) -> StoreResult<Tree> {
        let body = std::fs::read_to_string(&self.path).map_err(|err| self.io_error(err))?;
        decode_document(&body)
    }

    fn save(&self, records: &[Record]) -> StoreResult<()> {
        let body = encode_document(records)?;
        match std::fs::write(&self.path, body) {
            Ok(()) => {
                info!(
                    "event=store_save module=repo status=ok backend=json_file records={}",
                    records.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=repo status=error backend=json_file error={}",
                    err
                );
                Err(self.io_error(err))
            }
        }
    }
}
