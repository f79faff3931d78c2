//! Path assigner.
//!
//! # Invariants
//! - Record at position `i` under base `b` gets address `b ++ [i]`.
//! - Section `name` of a record at `a` is addressed under `a ++ [name]`.
//! - Stale addresses are always overwritten.

use crate::model::address::Address;
use crate::model::record::{Record, Tree};

/// Stamps every record of a root sequence with its positional address.
pub fn assign_addresses(records: Tree) -> Tree {
    assign_addresses_from(records, &Address::root())
}

/// Stamps every record of `records`, treating `base` as the sequence address.
pub fn assign_addresses_from(records: Vec<Record>, base: &Address) -> Vec<Record> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| assign_record(record, base.child(index)))
        .collect()
}

fn assign_record(mut record: Record, address: Address) -> Record {
    if let Some(sections) = record.sections.as_mut() {
        for (name, section) in sections.iter_mut() {
            let records = std::mem::take(&mut section.records);
            section.records = assign_addresses_from(records, &address.section(name));
        }
    }
    record.address = Some(address);
    record
}
