//! Dispatch session domain model.
//!
//! This module contains the core DispatchSession entity: the routing state
//! a send operates against.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agent::{self, AgentId};

/// Initial sampling temperature for a fresh session.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Represents one dispatch session in the domain layer.
///
/// A session contains:
/// - The currently active agent
/// - The auto-routing flag
/// - The sampling temperature forwarded to the response provider
///
/// Sessions are in-memory only; they live exactly as long as the workspace
/// that created them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchSession {
    /// Unique session identifier (UUID format), forwarded to the provider.
    pub id: String,
    /// The agent new messages are attributed and routed to.
    pub active_agent: AgentId,
    /// When true, each send re-evaluates the active agent from its text.
    pub auto_route: bool,
    /// Sampling temperature in `[0.0, 1.0]`.
    pub temperature: f64,
}

impl DispatchSession {
    /// Creates a fresh session with the catalog default agent, auto-routing
    /// enabled, and the default temperature.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            active_agent: AgentId::default(),
            auto_route: true,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Selects an agent explicitly.
    ///
    /// Works in both routing modes; with auto-routing enabled the selection
    /// holds until the next send that classifies differently.
    pub fn select_agent(&mut self, agent_id: AgentId) {
        self.active_agent = agent_id;
    }

    /// Enables or disables keyword auto-routing.
    pub fn set_auto_route(&mut self, enabled: bool) {
        self.auto_route = enabled;
    }

    /// Sets the sampling temperature, clamped to `[0.0, 1.0]`.
    ///
    /// Non-finite values are ignored and leave the temperature unchanged.
    pub fn set_temperature(&mut self, temperature: f64) {
        if temperature.is_finite() {
            self.temperature = temperature.clamp(0.0, 1.0);
        }
    }

    /// Routes an inbound message and returns the agent it belongs to.
    ///
    /// With auto-routing enabled the active agent is switched to the
    /// classifier's suggestion first, so the user turn and the eventual
    /// assistant turn carry the same attribution. With auto-routing
    /// disabled this is a read of the active agent.
    pub fn route(&mut self, text: &str) -> AgentId {
        if self.auto_route {
            let suggested = agent::classify(text);
            if suggested != self.active_agent {
                self.active_agent = suggested;
            }
        }
        self.active_agent
    }
}

impl Default for DispatchSession {
    fn default() -> Self {
        Self::new()
    }
}
