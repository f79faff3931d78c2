//! SQLite document tree store.
//!
//! # Responsibility
//! - Persist one named tree document per row of `tree_documents`.
//! - Reject connections that did not go through `db::open_db*`.
//!
//! # Invariants
//! - A document that was never saved loads as an empty tree.
//! - Save is an upsert of the full document body.

use crate::db::migrations::{current_user_version, latest_version};
use crate::model::record::{Record, Tree};
use crate::repo::tree_store::{decode_document, encode_document, StoreError, StoreResult, TreeStore};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};

/// Document name used when callers do not pick one.
pub const DEFAULT_DOCUMENT: &str = "records";

const DOCUMENTS_TABLE: &str = "tree_documents";

/// SQLite-backed tree store for one named document.
pub struct SqliteTreeStore<'conn> {
    conn: &'conn Connection,
    document: String,
}

impl<'conn> SqliteTreeStore<'conn> {
    /// Creates a store over a migrated connection.
    pub fn try_new(conn: &'conn Connection, document: impl Into<String>) -> StoreResult<Self> {
        ensure_store_connection_ready(conn)?;
        Ok(Self {
            conn,
            document: document.into(),
        })
    }

    pub fn document(&self) -> &str {
        &self.document
    }
}

impl TreeStore for SqliteTreeStore<'_> {
    fn load(&self) -> StoreResult<Tree> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM tree_documents WHERE name = ?1;",
                [self.document.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        match body {
            Some(body) => decode_document(&body),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, records: &[Record]) -> StoreResult<()> {
        let body = encode_document(records)?;
        self.conn.execute(
            "INSERT INTO tree_documents (name, body)
             VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET
                body = excluded.body,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.document, body],
        )?;
        info!(
            "event=store_save module=repo status=ok backend=sqlite document={} records={}",
            self.document,
            records.len()
        );
        Ok(())
    }
}

fn ensure_store_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [DOCUMENTS_TABLE],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(StoreError::MissingRequiredTable(DOCUMENTS_TABLE));
    }
    Ok(())
}
