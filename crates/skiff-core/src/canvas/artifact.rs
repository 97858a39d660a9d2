//! Canvas artifact domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::AgentId;

/// The kind of content an artifact holds.
///
/// Presentation-only; the store treats all kinds the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactKind {
    /// A conversation message parked on the canvas.
    Message,
    /// A file reference.
    File,
    /// A free-form note.
    Note,
}

/// A 2D canvas position. Valid positions lie in the non-negative quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Creates a position, clamping both coordinates to be non-negative.
    ///
    /// Non-finite coordinates (including NaN) clamp to zero.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_coordinate(x),
            y: clamp_coordinate(y),
        }
    }

    /// Returns this position shifted by the given deltas, clamped again.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Re-applies the quadrant clamp.
    ///
    /// `Position` has public fields, so values arriving over a DTO boundary
    /// may not have gone through [`Position::new`].
    pub fn clamped(self) -> Self {
        Self::new(self.x, self.y)
    }
}

fn clamp_coordinate(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// A versioned artifact placed on the canvas.
///
/// Artifacts are owned by the canvas store; everything handed to callers is
/// a snapshot copy. `lineage_id` ties all versions forked from one original
/// together and equals `id` for an original.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasArtifact {
    /// Globally unique artifact id.
    pub id: String,
    /// Shared across every version forked from a common ancestor.
    pub lineage_id: String,
    /// Version within the lineage, starting at 1 for an original.
    pub version: u32,
    /// What the content represents.
    pub kind: ArtifactKind,
    /// The parked content.
    pub content: String,
    /// The agent the content came from, when it came from a conversation.
    pub agent_id: Option<AgentId>,
    /// Where the artifact sits on the canvas.
    pub position: Position,
    /// When this version was created.
    pub created_at: DateTime<Utc>,
}
