//! The response provider contract.
//!
//! The dispatcher acquires assistant replies through this trait and never
//! learns whether they were simulated locally or relayed over HTTP.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use skiff_core::agent::AgentId;

/// Everything a provider needs to answer one dispatched message.
///
/// Captured by value at dispatch time, so a request is self-contained even
/// if the session state changes while the provider is working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRequest {
    /// The user's message text.
    pub message: String,
    /// The agent the reply will be attributed to.
    pub agent_id: AgentId,
    /// Sampling temperature in `[0.0, 1.0]`.
    pub temperature: f64,
    /// The dispatch session this message belongs to.
    pub session_id: String,
}

/// Errors a response provider can surface.
///
/// All of them are recoverable from the session's point of view; the
/// dispatcher turns any of these into a single fallback message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// The request never produced an HTTP response.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The relay answered with a non-success status.
    #[error("relay returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The relay answered with a success status but a structured error body.
    #[error("relay rejected the request: {0}")]
    Rejected(String),

    /// The response body did not match the expected envelope.
    #[error("malformed relay response: {0}")]
    Malformed(String),

    /// Provider configuration is missing or invalid.
    #[error("provider configuration error: {0}")]
    Config(String),
}

/// An abstract source of assistant replies.
///
/// # Arguments
///
/// Implementations receive the full [`ProviderRequest`] but are free to
/// ignore fields they have no use for; the relay contract, for instance,
/// only carries the message and session id on the wire.
#[async_trait]
pub trait ResponseProvider: Send + Sync {
    /// Produces the assistant reply for one dispatched message.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when no reply could be produced. The
    /// caller decides how to recover; providers never retry on their own.
    async fn respond(&self, request: &ProviderRequest) -> Result<String, ProviderError>;
}
