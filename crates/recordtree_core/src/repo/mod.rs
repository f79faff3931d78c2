//! Storage collaborators for the record tree.
//!
//! # Responsibility
//! - Define the whole-document load/save contract (`TreeStore`).
//! - Keep file and SQLite details out of the tree service.
//!
//! # Invariants
//! - Stores persist the stripped shape; `__path` never reaches storage.
//! - Save is a whole-document replace.

pub mod json_store;
pub mod sqlite_store;
pub mod tree_store;
