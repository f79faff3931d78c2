//! Flutter-facing bindings for recordtree.

pub mod api;
