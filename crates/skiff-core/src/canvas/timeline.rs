//! Timeline scrubbing: playhead position and version visibility.
//!
//! Scrubbing never changes what the canvas stores. The playhead is a pure
//! presentation filter: each version has a reveal threshold, and versions
//! the playhead has not reached yet render dimmed rather than hidden.

use serde::{Deserialize, Serialize};

use super::artifact::CanvasArtifact;

/// Playhead travel needed to reveal each successive version.
pub const VERSION_STEP: u8 = 20;

/// How an artifact should be rendered at the current playhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    /// The playhead has reached this version's threshold.
    Opaque,
    /// Rendered but de-emphasized; the playhead has not reached it yet.
    Dimmed,
}

/// The scrubber position over canvas history, clamped to `0..=100`.
///
/// The default sits at the far end of the track, revealing every version a
/// fresh canvas can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", from = "u8")]
pub struct Playhead(u8);

impl Playhead {
    pub const MIN: Playhead = Playhead(0);
    pub const MAX: Playhead = Playhead(100);

    /// Creates a playhead, clamping the value to `0..=100`.
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX.0))
    }

    /// The raw scrubber value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Playhead {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<u8> for Playhead {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Playhead> for u8 {
    fn from(playhead: Playhead) -> Self {
        playhead.0
    }
}

/// Derives the visibility of a version at the given playhead.
///
/// A version is revealed once the playhead reaches `version * VERSION_STEP`.
/// Versions whose threshold lies beyond the end of the track stay dimmed at
/// every playhead position.
pub fn visibility(version: u32, playhead: Playhead) -> Visibility {
    let threshold = u64::from(version) * u64::from(VERSION_STEP);
    if u64::from(playhead.value()) >= threshold {
        Visibility::Opaque
    } else {
        Visibility::Dimmed
    }
}

/// Convenience form of [`visibility`] for a stored artifact.
pub fn artifact_visibility(artifact: &CanvasArtifact, playhead: Playhead) -> Visibility {
    visibility(artifact.version, playhead)
}
