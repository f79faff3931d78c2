//! Pure tree transformations over addressed record trees.
//!
//! # Responsibility
//! - Assign positional addresses (`assign`).
//! - Remove one addressed record with its subtree (`prune`).
//! - Provide traversal helpers shared by service and presentation callers.
//!
//! # Invariants
//! - No function in this module performs I/O or keeps state across calls.
//! - After any structural mutation, callers must re-run the assigner.

use crate::model::address::Address;
use crate::model::record::{Record, Tree};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod assign;
pub mod prune;

pub use assign::{assign_addresses, assign_addresses_from};
pub use prune::{prune, Pruned};

/// Caller-input errors for tree operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// Target address is missing or empty.
    AddressRequired,
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddressRequired => write!(f, "address is required"),
        }
    }
}

impl Error for TreeError {}

/// Removes every derived address, producing the persisted shape.
pub fn strip_addresses(records: Tree) -> Tree {
    records.into_iter().map(strip_record).collect()
}

fn strip_record(mut record: Record) -> Record {
    record.address = None;
    if let Some(sections) = record.sections.as_mut() {
        for section in sections.values_mut() {
            let records = std::mem::take(&mut section.records);
            section.records = strip_addresses(records);
        }
    }
    record
}

/// Visits every record depth-first in document order.
///
/// The visitor receives the nesting depth (root records are `0`).
pub fn walk<'a>(records: &'a [Record], visit: &mut impl FnMut(usize, &'a Record)) {
    walk_at(records, 0, visit);
}

fn walk_at<'a>(records: &'a [Record], depth: usize, visit: &mut impl FnMut(usize, &'a Record)) {
    for record in records {
        visit(depth, record);
        if let Some(sections) = record.sections.as_ref() {
            for section in sections.values() {
                walk_at(&section.records, depth + 1, visit);
            }
        }
    }
}

/// Collects the address of every addressed record in document order.
pub fn collect_addresses(records: &[Record]) -> Vec<Address> {
    let mut addresses = Vec::new();
    walk(records, &mut |_, record| {
        if let Some(address) = record.address.as_ref() {
            addresses.push(address.clone());
        }
    });
    addresses
}

/// Counts every record reachable from `records`.
pub fn count_records(records: &[Record]) -> usize {
    let mut count = 0;
    walk(records, &mut |_, _| count += 1);
    count
}

/// Finds the record whose canonical address equals `target`.
pub fn find<'a>(records: &'a [Record], target: &Address) -> Option<&'a Record> {
    let target = target.canonical();
    let mut found = None;
    walk(records, &mut |_, record| {
        if found.is_none() && record.canonical_address() == target {
            found = Some(record);
        }
    });
    found
}

/// Union of field names across one sibling sequence, in first-seen order.
pub fn column_keys(records: &[Record]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for record in records {
        for name in record.fields.keys() {
            if !keys.contains(name) {
                keys.push(name.clone());
            }
        }
    }
    keys
}
