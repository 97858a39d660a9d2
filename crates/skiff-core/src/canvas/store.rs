//! In-memory arena of canvas artifacts with lineage tracking.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::agent::AgentId;
use crate::error::{Result, SkiffError};

use super::artifact::{ArtifactKind, CanvasArtifact, Position};

/// Offset applied to a fork relative to its source artifact, on both axes.
pub const FORK_OFFSET: f64 = 20.0;

/// Per-lineage bookkeeping.
///
/// `highest_version` is a high-water mark over every version the lineage
/// has ever issued, not a maximum over surviving members. Removing the
/// newest version and forking again must not reuse its number.
#[derive(Debug, Clone, Default)]
struct LineageRecord {
    /// Live member ids in version order.
    members: Vec<String>,
    highest_version: u32,
}

/// Owns every artifact placed on the canvas.
///
/// Artifacts live in an arena keyed by id, with a secondary index from
/// lineage id to that lineage's members. All mutation goes through the
/// store so the lineage invariants hold; callers get snapshot clones.
#[derive(Debug, Clone, Default)]
pub struct CanvasStore {
    artifacts: HashMap<String, CanvasArtifact>,
    lineages: HashMap<String, LineageRecord>,
}

impl CanvasStore {
    /// Creates an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a new artifact on the canvas.
    ///
    /// The artifact starts a fresh lineage: version 1, with `lineage_id`
    /// equal to its own id. The position is clamped to the non-negative
    /// quadrant.
    pub fn add_artifact(
        &mut self,
        content: impl Into<String>,
        kind: ArtifactKind,
        position: Position,
        agent_id: Option<AgentId>,
    ) -> CanvasArtifact {
        let id = Uuid::new_v4().to_string();
        let artifact = CanvasArtifact {
            id: id.clone(),
            lineage_id: id.clone(),
            version: 1,
            kind,
            content: content.into(),
            agent_id,
            position: position.clamped(),
            created_at: Utc::now(),
        };

        self.lineages.insert(
            id.clone(),
            LineageRecord {
                members: vec![id.clone()],
                highest_version: 1,
            },
        );
        self.artifacts.insert(id, artifact.clone());
        artifact
    }

    /// Moves an artifact, clamping the target to the non-negative quadrant.
    ///
    /// Returns `false` when `id` names no live artifact, which happens when
    /// a drag races a removal and is harmless.
    pub fn reposition(&mut self, id: &str, position: Position) -> bool {
        match self.artifacts.get_mut(id) {
            Some(artifact) => {
                artifact.position = position.clamped();
                true
            }
            None => false,
        }
    }

    /// Forks an artifact into a new version of its lineage.
    ///
    /// The fork copies the source's content and attribution, takes the next
    /// version number the lineage has ever issued, and sits offset by
    /// (+[`FORK_OFFSET`], +[`FORK_OFFSET`]) from the source.
    ///
    /// # Errors
    ///
    /// Returns [`SkiffError::NotFound`] if `id` names no live artifact.
    pub fn fork(&mut self, id: &str) -> Result<CanvasArtifact> {
        let source = self
            .artifacts
            .get(id)
            .cloned()
            .ok_or_else(|| SkiffError::not_found("artifact", id))?;

        let lineage = self.lineages.entry(source.lineage_id.clone()).or_default();
        lineage.highest_version += 1;

        let fork_id = Uuid::new_v4().to_string();
        let fork = CanvasArtifact {
            id: fork_id.clone(),
            lineage_id: source.lineage_id.clone(),
            version: lineage.highest_version,
            kind: source.kind,
            content: source.content,
            agent_id: source.agent_id,
            position: source.position.offset(FORK_OFFSET, FORK_OFFSET),
            created_at: Utc::now(),
        };

        lineage.members.push(fork_id.clone());
        self.artifacts.insert(fork_id, fork.clone());
        Ok(fork)
    }

    /// Removes an artifact from the canvas.
    ///
    /// The rest of the lineage stays, and version numbers already issued
    /// are never reused. Removing an unknown id is a no-op; the return
    /// value reports whether anything was actually removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(artifact) = self.artifacts.remove(id) else {
            return false;
        };

        if let Some(lineage) = self.lineages.get_mut(&artifact.lineage_id) {
            lineage.members.retain(|member| member != id);
            if lineage.members.is_empty() {
                // Nothing can fork an empty lineage back to life.
                self.lineages.remove(&artifact.lineage_id);
            }
        }
        true
    }

    /// Returns a snapshot of one artifact.
    pub fn get(&self, id: &str) -> Option<CanvasArtifact> {
        self.artifacts.get(id).cloned()
    }

    /// Returns snapshots of every live artifact, in unspecified order.
    pub fn artifacts(&self) -> Vec<CanvasArtifact> {
        self.artifacts.values().cloned().collect()
    }

    /// Returns the live members of a lineage, oldest version first.
    ///
    /// Unknown lineage ids yield an empty list.
    pub fn lineage_members(&self, lineage_id: &str) -> Vec<CanvasArtifact> {
        let Some(lineage) = self.lineages.get(lineage_id) else {
            return Vec::new();
        };
        lineage
            .members
            .iter()
            .filter_map(|id| self.artifacts.get(id).cloned())
            .collect()
    }

    /// Number of artifacts currently on the canvas.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// True when the canvas holds no artifacts.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(store: &mut CanvasStore, x: f64, y: f64) -> CanvasArtifact {
        store.add_artifact("note", ArtifactKind::Note, Position::new(x, y), None)
    }

    #[test]
    fn test_add_artifact_starts_a_lineage_at_version_one() {
        let mut store = CanvasStore::new();
        let artifact = note(&mut store, 10.0, 10.0);

        assert_eq!(artifact.version, 1);
        assert_eq!(artifact.lineage_id, artifact.id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_fork_offsets_position_and_bumps_version() {
        let mut store = CanvasStore::new();
        let original = note(&mut store, 10.0, 10.0);

        let fork = store.fork(&original.id).unwrap();
        assert_eq!(fork.version, 2);
        assert_eq!(fork.lineage_id, original.id);
        assert_eq!(fork.position, Position { x: 30.0, y: 30.0 });
        assert_ne!(fork.id, original.id);
        assert_eq!(fork.content, original.content);
    }

    #[test]
    fn test_fork_chain_versions_strictly_increase() {
        let mut store = CanvasStore::new();
        let original = note(&mut store, 0.0, 0.0);
        let second = store.fork(&original.id).unwrap();
        let third = store.fork(&second.id).unwrap();

        assert_eq!(second.version, 2);
        assert_eq!(third.version, 3);
        assert_eq!(third.lineage_id, original.id);
    }

    #[test]
    fn test_fork_never_reuses_a_removed_version() {
        let mut store = CanvasStore::new();
        let original = note(&mut store, 0.0, 0.0);
        let second = store.fork(&original.id).unwrap();

        assert!(store.remove(&second.id));
        let third = store.fork(&original.id).unwrap();
        assert_eq!(third.version, 3);
    }

    #[test]
    fn test_fork_missing_artifact_is_not_found() {
        let mut store = CanvasStore::new();
        let err = store.fork("nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_reposition_clamps_to_non_negative_quadrant() {
        let mut store = CanvasStore::new();
        let artifact = note(&mut store, 5.0, 5.0);

        assert!(store.reposition(&artifact.id, Position { x: -40.0, y: 7.0 }));
        let moved = store.get(&artifact.id).unwrap();
        assert_eq!(moved.position, Position { x: 0.0, y: 7.0 });
    }

    #[test]
    fn test_reposition_missing_artifact_is_a_no_op() {
        let mut store = CanvasStore::new();
        assert!(!store.reposition("gone", Position::new(1.0, 1.0)));
    }

    #[test]
    fn test_remove_does_not_cascade_through_the_lineage() {
        let mut store = CanvasStore::new();
        let original = note(&mut store, 0.0, 0.0);
        let fork = store.fork(&original.id).unwrap();

        assert!(store.remove(&original.id));
        assert!(store.get(&fork.id).is_some());
        assert_eq!(store.lineage_members(&original.id).len(), 1);
    }

    #[test]
    fn test_remove_missing_artifact_is_a_no_op() {
        let mut store = CanvasStore::new();
        assert!(!store.remove("gone"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_lineage_members_come_back_in_version_order() {
        let mut store = CanvasStore::new();
        let original = note(&mut store, 0.0, 0.0);
        store.fork(&original.id).unwrap();
        let members = store.lineage_members(&original.id);

        let versions: Vec<u32> = members.iter().map(|m| m.version).collect();
        assert_eq!(versions, vec![1, 2]);
    }

    #[test]
    fn test_separate_artifacts_have_separate_lineages() {
        let mut store = CanvasStore::new();
        let a = note(&mut store, 0.0, 0.0);
        let b = note(&mut store, 50.0, 50.0);

        let fork = store.fork(&a.id).unwrap();
        assert_eq!(fork.lineage_id, a.id);
        assert_eq!(store.lineage_members(&b.id).len(), 1);
    }
}
