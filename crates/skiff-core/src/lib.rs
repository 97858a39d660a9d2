//! Core domain layer for the skiff workspace.
//!
//! Pure, I/O-free building blocks: the agent catalog and classifier, the
//! dispatch session and its transcript types, per-agent usage accounting,
//! and the versioned canvas with its timeline gate. Orchestration and the
//! provider boundary live in the crates layered on top.

pub mod agent;
pub mod canvas;
pub mod error;
pub mod ledger;
pub mod session;

// Re-export common error type
pub use error::SkiffError;
