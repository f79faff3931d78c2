//! Runtime configuration for tree front ends.
//!
//! # Responsibility
//! - Resolve data location, store backend and logging settings.
//! - Read `RECORDTREE_*` environment overrides with one shared policy.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Backend choice is derived from the data path extension.

use crate::logging::default_log_level;
use crate::repo::sqlite_store::DEFAULT_DOCUMENT;
use std::path::{Path, PathBuf};

pub const ENV_DATA_PATH: &str = "RECORDTREE_DATA_PATH";
pub const ENV_DOCUMENT: &str = "RECORDTREE_DOCUMENT";
pub const ENV_LOG_LEVEL: &str = "RECORDTREE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "RECORDTREE_LOG_DIR";

/// Data file used when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "example-data.json";

const SQLITE_EXTENSIONS: &[&str] = &["sqlite", "sqlite3", "db"];

/// Storage backend selected for a data path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Whole tree stored as one JSON file.
    JsonFile,
    /// Tree stored as a named document row in SQLite.
    Sqlite,
}

impl StoreBackend {
    /// Picks the backend from the path extension (case-insensitive).
    pub fn for_path(path: &Path) -> Self {
        let is_sqlite = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                SQLITE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if is_sqlite {
            Self::Sqlite
        } else {
            Self::JsonFile
        }
    }
}

/// Resolved front-end configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    pub data_path: PathBuf,
    pub backend: StoreBackend,
    /// Document name inside SQLite stores; ignored for JSON files.
    pub document: String,
    pub log_level: String,
    /// Rolling log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::for_data_path(DEFAULT_DATA_FILE)
    }
}

impl TreeConfig {
    /// Default configuration pointed at `data_path`.
    pub fn for_data_path(data_path: impl Into<PathBuf>) -> Self {
        let data_path = data_path.into();
        Self {
            backend: StoreBackend::for_path(&data_path),
            data_path,
            document: DEFAULT_DOCUMENT.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }

    /// Resolves configuration from process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let mut config = match value(ENV_DATA_PATH) {
            Some(path) => Self::for_data_path(path),
            None => Self::default(),
        };
        if let Some(document) = value(ENV_DOCUMENT) {
            config.document = document;
        }
        if let Some(level) = value(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        config.log_dir = value(ENV_LOG_DIR).map(PathBuf::from);
        config
    }
}
