//! Tree pruner.
//!
//! # Invariants
//! - Matching compares canonical address strings only; `ID` is ignored.
//! - Every surviving branch is descended, with no early exit on first match.
//! - Survivors keep their relative sibling order.

use crate::model::address::Address;
use crate::model::record::{Record, Tree};
use crate::tree::TreeError;

/// Result of one prune pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pruned {
    /// Remaining tree, still carrying the pre-prune addresses.
    pub records: Tree,
    /// Removed records with their full subtrees, in visit order.
    pub removed: Vec<Record>,
}

impl Pruned {
    /// Returns whether any record matched the target.
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Removes the record addressed by `target`, together with its subtree.
///
/// # Errors
/// - `TreeError::AddressRequired` when `target` is empty.
pub fn prune(records: Tree, target: &Address) -> Result<Pruned, TreeError> {
    if target.is_empty() {
        return Err(TreeError::AddressRequired);
    }

    let target = target.canonical();
    let mut removed = Vec::new();
    let records = prune_sequence(records, &target, &mut removed);
    Ok(Pruned { records, removed })
}

fn prune_sequence(records: Vec<Record>, target: &str, removed: &mut Vec<Record>) -> Vec<Record> {
    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        if record.canonical_address() == target {
            removed.push(record);
            continue;
        }
        kept.push(prune_sections(record, target, removed));
    }
    kept
}

fn prune_sections(mut record: Record, target: &str, removed: &mut Vec<Record>) -> Record {
    if let Some(sections) = record.sections.as_mut() {
        for section in sections.values_mut() {
            let records = std::mem::take(&mut section.records);
            section.records = prune_sequence(records, target, removed);
        }
    }
    record
}
