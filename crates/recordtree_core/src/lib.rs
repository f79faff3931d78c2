//! Core domain logic for recordtree.
//! This crate owns positional addressing and path-based removal over
//! hierarchical record trees, plus the storage collaborators behind them.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod tree;

pub use config::{StoreBackend, TreeConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::address::{Address, AddressError, Segment, ADDRESS_SEPARATOR};
pub use model::record::{Fields, Record, Section, Sections, Tree, ID_FIELD, SECTION_HEADER_PREFIX};
pub use repo::json_store::JsonFileTreeStore;
pub use repo::sqlite_store::{SqliteTreeStore, DEFAULT_DOCUMENT};
pub use repo::tree_store::{StoreError, StoreResult, TreeStore};
pub use service::tree_service::{DeleteOutcome, RecordTreeService, TreeServiceError};
pub use tree::{
    assign_addresses, assign_addresses_from, collect_addresses, column_keys, count_records, find,
    prune, strip_addresses, walk, Pruned, TreeError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
