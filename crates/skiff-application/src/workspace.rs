//! Workspace facade: one dispatch session plus its canvas and timeline.
//!
//! The workspace wires the dispatcher to the versioned canvas and owns the
//! timeline playhead. It also implements the drag-and-drop boundary: the
//! chat surface hands over a transcript message id and drop coordinates,
//! and the workspace parks the message as a canvas artifact.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;

use skiff_core::canvas::{
    ArtifactKind, CanvasArtifact, CanvasStore, Playhead, Position, Visibility,
    artifact_visibility,
};
use skiff_core::error::SkiffError;
use skiff_interaction::ResponseProvider;

use crate::dispatcher::{DispatchOutcome, Dispatcher};

/// A session-scoped workspace: conversation, canvas, and timeline.
///
/// Everything is in-memory and lives exactly as long as this value; there
/// is no persistence layer behind it.
pub struct Workspace {
    dispatcher: Dispatcher,
    canvas: RwLock<CanvasStore>,
    playhead: RwLock<Playhead>,
}

impl Workspace {
    /// Creates a workspace with a fresh session over the given provider.
    ///
    /// The playhead starts at the end of the track, so every version a
    /// fresh canvas can hold renders opaque.
    pub fn new(provider: Arc<dyn ResponseProvider>) -> Self {
        Self {
            dispatcher: Dispatcher::new(provider),
            canvas: RwLock::new(CanvasStore::new()),
            playhead: RwLock::new(Playhead::default()),
        }
    }

    /// The dispatcher driving this workspace's conversation.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Dispatches user input through the session.
    pub async fn send(&self, input: &str) -> DispatchOutcome {
        self.dispatcher.send(input).await
    }

    /// Parks a transcript message onto the canvas at the drop position.
    ///
    /// The artifact takes the message's content and agent attribution and
    /// starts a fresh lineage at version 1.
    ///
    /// # Errors
    ///
    /// Fails when `message_id` names no transcript message.
    pub async fn park_message(
        &self,
        message_id: &str,
        position: Position,
    ) -> Result<CanvasArtifact> {
        let message = self
            .dispatcher
            .find_message(message_id)
            .await
            .ok_or_else(|| SkiffError::not_found("message", message_id))?;

        let mut canvas = self.canvas.write().await;
        let artifact = canvas.add_artifact(
            message.content,
            ArtifactKind::Message,
            position,
            Some(message.agent_id),
        );
        tracing::info!(
            "[Workspace] Parked message {} as artifact {}",
            message_id,
            artifact.id
        );
        Ok(artifact)
    }

    /// Places a free-standing artifact on the canvas without attribution.
    pub async fn add_artifact(
        &self,
        content: impl Into<String>,
        kind: ArtifactKind,
        position: Position,
    ) -> CanvasArtifact {
        self.canvas
            .write()
            .await
            .add_artifact(content, kind, position, None)
    }

    /// Forks an artifact into the next version of its lineage.
    ///
    /// # Errors
    ///
    /// Fails when `artifact_id` names no live artifact.
    pub async fn fork_artifact(&self, artifact_id: &str) -> Result<CanvasArtifact> {
        let fork = self.canvas.write().await.fork(artifact_id)?;
        tracing::info!(
            "[Workspace] Forked artifact {} into {} (version {})",
            artifact_id,
            fork.id,
            fork.version
        );
        Ok(fork)
    }

    /// Moves an artifact to a new position, clamped to the canvas quadrant.
    ///
    /// Returns `false` when the artifact is already gone; a drag that races
    /// a removal is harmless.
    pub async fn reposition_artifact(&self, artifact_id: &str, position: Position) -> bool {
        let moved = self.canvas.write().await.reposition(artifact_id, position);
        if !moved {
            tracing::debug!(
                "[Workspace] Reposition ignored, artifact {} is gone",
                artifact_id
            );
        }
        moved
    }

    /// Removes an artifact, leaving the rest of its lineage in place.
    ///
    /// Removing an unknown id is a no-op.
    pub async fn remove_artifact(&self, artifact_id: &str) -> bool {
        let removed = self.canvas.write().await.remove(artifact_id);
        if !removed {
            tracing::debug!(
                "[Workspace] Remove ignored, artifact {} is gone",
                artifact_id
            );
        }
        removed
    }

    /// Snapshots every artifact on the canvas.
    pub async fn artifacts(&self) -> Vec<CanvasArtifact> {
        self.canvas.read().await.artifacts()
    }

    /// Snapshots one artifact.
    pub async fn artifact(&self, artifact_id: &str) -> Option<CanvasArtifact> {
        self.canvas.read().await.get(artifact_id)
    }

    /// Snapshots the live members of a lineage, oldest version first.
    pub async fn lineage(&self, lineage_id: &str) -> Vec<CanvasArtifact> {
        self.canvas.read().await.lineage_members(lineage_id)
    }

    /// Moves the timeline playhead.
    pub async fn set_playhead(&self, playhead: Playhead) {
        *self.playhead.write().await = playhead;
    }

    /// The current timeline playhead.
    pub async fn playhead(&self) -> Playhead {
        *self.playhead.read().await
    }

    /// Snapshots every artifact together with its visibility at the
    /// current playhead.
    ///
    /// Scrubbing is pure presentation: dimmed artifacts are still on the
    /// canvas and still fork and move normally.
    pub async fn visible_artifacts(&self) -> Vec<(CanvasArtifact, Visibility)> {
        let playhead = *self.playhead.read().await;
        self.canvas
            .read()
            .await
            .artifacts()
            .into_iter()
            .map(|artifact| {
                let visibility = artifact_visibility(&artifact, playhead);
                (artifact, visibility)
            })
            .collect()
    }

    /// Closes the workspace's session.
    ///
    /// Canvas snapshots stay readable, but sends report
    /// [`DispatchOutcome::Closed`] from here on.
    pub fn close(&self) {
        self.dispatcher.close();
    }
}
