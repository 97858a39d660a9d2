//! Error types for the skiff domain layer.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the skiff domain layer.
///
/// This provides typed, structured error variants so callers can react to a
/// specific failure instead of matching on message strings.
#[derive(Error, Debug, Clone, Serialize)]
pub enum SkiffError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SkiffError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Conversion from String (for error messages)
impl From<String> for SkiffError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, SkiffError>`.
pub type Result<T> = std::result::Result<T, SkiffError>;
