//! Canvas domain module.
//!
//! This module contains the versioned canvas: the artifact model, the arena
//! store that owns placed artifacts, and the timeline visibility gate.
//!
//! # Module Structure
//!
//! - `artifact`: Artifact domain model (`CanvasArtifact`, `ArtifactKind`, `Position`)
//! - `store`: Arena store with lineage tracking (`CanvasStore`)
//! - `timeline`: Playhead and visibility derivation (`Playhead`, `Visibility`)
//!
//! # Usage
//!
//! ```ignore
//! use skiff_core::canvas::{ArtifactKind, CanvasStore, Playhead, Position, artifact_visibility};
//!
//! let mut store = CanvasStore::new();
//! let original = store.add_artifact("idea", ArtifactKind::Note, Position::new(10.0, 10.0), None);
//! let fork = store.fork(&original.id)?;
//! let shown = artifact_visibility(&fork, Playhead::default());
//! ```

mod artifact;
mod store;
mod timeline;

// Re-export public API
pub use artifact::{ArtifactKind, CanvasArtifact, Position};
pub use store::{CanvasStore, FORK_OFFSET};
pub use timeline::{Playhead, VERSION_STEP, Visibility, artifact_visibility, visibility};
