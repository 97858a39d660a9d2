//! Application layer for the skiff workspace.
//!
//! Composes the domain core with a response provider: the [`Dispatcher`]
//! runs the send path for one session, and the [`Workspace`] facade adds
//! the versioned canvas and timeline on top.

pub mod dispatcher;
pub mod workspace;

// Re-export public API
pub use dispatcher::{DispatchOutcome, Dispatcher, FALLBACK_REPLY};
pub use workspace::Workspace;
