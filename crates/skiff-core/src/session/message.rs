//! Conversation message types.
//!
//! This module contains types for representing the turns of a dispatch
//! session, including roles and attribution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agent::AgentId;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from an agent (or the local fallback on provider failure).
    Assistant,
}

/// A single message in a dispatch transcript.
///
/// Messages are immutable once created. `agent_id` records the agent that
/// was active when the message was produced; for assistant messages this is
/// the agent captured at dispatch time, never re-read afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message id.
    pub id: String,
    /// The role of the message sender.
    pub role: MessageRole,
    /// The agent this message is attributed to.
    pub agent_id: AgentId,
    /// The content of the message.
    pub content: String,
    /// Timestamp when the message was created.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a user message attributed to the given agent.
    pub fn user(agent_id: AgentId, content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, agent_id, content)
    }

    /// Creates an assistant message attributed to the given agent.
    pub fn assistant(agent_id: AgentId, content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, agent_id, content)
    }

    fn new(role: MessageRole, agent_id: AgentId, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            agent_id,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}
