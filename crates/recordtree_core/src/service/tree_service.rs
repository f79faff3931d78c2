//! Record tree use-case service.
//!
//! # Responsibility
//! - Compose store, path assigner and pruner into read and delete use cases.
//! - Map store/tree failures onto caller-facing error kinds.
//!
//! # Invariants
//! - Returned trees are always freshly addressed.
//! - An unreadable store reads as an empty tree.
//! - A delete that removes nothing never writes to the store.
//! - A failed save never returns a tree presented as persisted.

use crate::model::address::{Address, AddressError};
use crate::model::record::Tree;
use crate::repo::tree_store::{StoreError, TreeStore};
use crate::tree::{assign_addresses, count_records, prune, strip_addresses, TreeError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Errors from record tree service operations.
#[derive(Debug)]
pub enum TreeServiceError {
    /// No target address was supplied.
    AddressRequired,
    /// Target address could not be parsed.
    InvalidAddress(AddressError),
    /// Store could not be read (only from `try_load_tree`).
    StoreUnreadable(StoreError),
    /// Pruned tree could not be persisted.
    StoreUnwritable(StoreError),
}

impl Display for TreeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddressRequired => write!(f, "address is required"),
            Self::InvalidAddress(err) => write!(f, "invalid address: {err}"),
            Self::StoreUnreadable(err) => write!(f, "failed to load records: {err}"),
            Self::StoreUnwritable(err) => write!(f, "failed to save records: {err}"),
        }
    }
}

impl Error for TreeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AddressRequired => None,
            Self::InvalidAddress(err) => Some(err),
            Self::StoreUnreadable(err) => Some(err),
            Self::StoreUnwritable(err) => Some(err),
        }
    }
}

impl From<TreeError> for TreeServiceError {
    fn from(value: TreeError) -> Self {
        match value {
            TreeError::AddressRequired => Self::AddressRequired,
        }
    }
}

impl From<AddressError> for TreeServiceError {
    fn from(value: AddressError) -> Self {
        Self::InvalidAddress(value)
    }
}

/// Result of one delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Tree after deletion, re-addressed.
    pub records: Tree,
    /// Number of records removed, descendants included. Zero means no-op.
    pub removed: usize,
}

/// Record tree service facade.
pub struct RecordTreeService<S: TreeStore> {
    store: S,
}

impl<S: TreeStore> RecordTreeService<S> {
    /// Creates service from store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Loads the addressed tree, degrading to empty when the store fails.
    pub fn load_tree(&self) -> Tree {
        match self.try_load_tree() {
            Ok(records) => records,
            Err(err) => {
                error!(
                    "event=tree_load module=service status=error fallback=empty error={}",
                    err
                );
                Vec::new()
            }
        }
    }

    /// Loads the addressed tree, surfacing store failures.
    pub fn try_load_tree(&self) -> Result<Tree, TreeServiceError> {
        let started_at = Instant::now();
        let raw = self
            .store
            .load()
            .map_err(TreeServiceError::StoreUnreadable)?;
        let records = assign_addresses(raw);
        info!(
            "event=tree_load module=service status=ok records={} duration_ms={}",
            count_records(&records),
            started_at.elapsed().as_millis()
        );
        Ok(records)
    }

    /// Deletes the record at `target` together with its subtree.
    ///
    /// # Errors
    /// - `AddressRequired` when `target` is empty; the store is untouched.
    /// - `StoreUnwritable` when persisting the pruned tree fails.
    pub fn delete_record(&mut self, target: &Address) -> Result<DeleteOutcome, TreeServiceError> {
        if target.is_empty() {
            warn!("event=tree_delete module=service status=rejected reason=address_required");
            return Err(TreeServiceError::AddressRequired);
        }

        let started_at = Instant::now();
        let pruned = prune(self.load_tree(), target)?;
        if pruned.is_noop() {
            info!(
                "event=tree_delete module=service status=noop address={}",
                target
            );
            return Ok(DeleteOutcome {
                records: pruned.records,
                removed: 0,
            });
        }

        let removed = count_records(&pruned.removed);
        let stripped = strip_addresses(pruned.records);
        if let Err(err) = self.store.save(&stripped) {
            error!(
                "event=tree_delete module=service status=error address={} error={}",
                target, err
            );
            return Err(TreeServiceError::StoreUnwritable(err));
        }

        info!(
            "event=tree_delete module=service status=ok address={} removed={} duration_ms={}",
            target,
            removed,
            started_at.elapsed().as_millis()
        );
        Ok(DeleteOutcome {
            records: assign_addresses(stripped),
            removed,
        })
    }

    /// Deletes by wire-form address segments.
    pub fn delete_by_wire<T: AsRef<str>>(
        &mut self,
        segments: &[T],
    ) -> Result<DeleteOutcome, TreeServiceError> {
        let target = Address::from_wire(segments)?;
        self.delete_record(&target)
    }

    /// Deletes by canonical dot-joined address.
    pub fn delete_by_canonical(
        &mut self,
        canonical: &str,
    ) -> Result<DeleteOutcome, TreeServiceError> {
        let target = Address::parse(canonical)?;
        self.delete_record(&target)
    }
}
