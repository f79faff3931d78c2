//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and tree operations into use-case level APIs.
//! - Keep CLI/FFI layers decoupled from storage details.

pub mod tree_service;
