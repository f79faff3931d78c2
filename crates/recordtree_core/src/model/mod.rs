//! Record tree domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core tree operations.
//! - Keep addressing types separate from the stored record shape.
//!
//! # Invariants
//! - Every addressed record is identified by its position, not its `ID`.
//! - Deletion is a hard structural removal; there are no tombstones.

pub mod address;
pub mod record;
