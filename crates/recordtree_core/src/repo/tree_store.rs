//! Tree store contract and shared storage errors.

use crate::db::DbError;
use crate::model::record::{Record, Tree};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Result type used by tree store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from loading or saving a stored tree document.
#[derive(Debug)]
pub enum StoreError {
    /// Backing file cannot be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Stored document is not a valid record tree, or cannot be encoded.
    Json(serde_json::Error),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Json(err) => write!(f, "invalid tree document: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "tree store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "tree store requires table `{table}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Whole-document storage contract for the record tree.
///
/// Implementations never see concurrent calls from one service; callers
/// sharing a backing document across services must serialize
/// load-mutate-save cycles themselves.
pub trait TreeStore {
    /// Loads the raw (unaddressed) tree.
    fn load(&self) -> StoreResult<Tree>;
    /// Replaces the stored tree. Addresses on `records` are dropped.
    fn save(&self, records: &[Record]) -> StoreResult<()>;
}

impl<S: TreeStore + ?Sized> TreeStore for &S {
    fn load(&self) -> StoreResult<Tree> {
        (**self).load()
    }

    fn save(&self, records: &[Record]) -> StoreResult<()> {
        (**self).save(records)
    }
}

impl<S: TreeStore + ?Sized> TreeStore for Box<S> {
    fn load(&self) -> StoreResult<Tree> {
        (**self).load()
    }

    fn save(&self, records: &[Record]) -> StoreResult<()> {
        (**self).save(records)
    }
}

/// Encodes `records` in the persisted document layout.
///
/// Addresses are stripped and the output uses two-space pretty printing.
pub(crate) fn encode_document(records: &[Record]) -> StoreResult<String> {
    let stripped = crate::tree::strip_addresses(records.to_vec());
    Ok(serde_json::to_string_pretty(&stripped)?)
}

/// Decodes a persisted document. Any stray `__path` keys are discarded.
pub(crate) fn decode_document(body: &str) -> StoreResult<Tree> {
    let records: Tree = serde_json::from_str(body)?;
    Ok(crate::tree::strip_addresses(records))
}
