//! SimulatedProvider - local, zero-network response simulation.
//!
//! Replies come from small per-agent pools styled after each persona.
//! Selection is deterministic in the message text, so a given conversation
//! always produces the same transcript and the same ledger totals. An
//! optional artificial delay imitates remote latency for UI work.

use std::time::Duration;

use async_trait::async_trait;

use skiff_core::agent::{self, AgentId};

use crate::provider::{ProviderError, ProviderRequest, ResponseProvider};

const DEEP_THINKER_REPLIES: &[&str] = &[
    "Let me take this apart carefully. The underlying structure suggests that...",
    "Viewed from first principles, the question reduces to...",
    "There is a subtle assumption here worth examining before anything else...",
];

const CREATIVE_GENERALIST_REPLIES: &[&str] = &[
    "Good question! Here's how I'd think about it...",
    "Happy to dig into this with you. A few thoughts...",
    "Let's work through it together. Starting from what you said...",
];

const RATIONAL_JOURNALIST_REPLIES: &[&str] = &[
    "The established facts are as follows...",
    "Here is a structured summary of what is known...",
    "Sources agree on three main points...",
];

const DEEP_CREATOR_REPLIES: &[&str] = &[
    "What if we turned the whole premise inside out? Picture this...",
    "Here's an angle nobody asked for, which is exactly why it might work...",
    "Forget the obvious version. The interesting one looks like...",
];

/// A provider that fabricates persona-styled replies locally.
#[derive(Debug, Clone, Default)]
pub struct SimulatedProvider {
    latency: Duration,
}

impl SimulatedProvider {
    /// Creates a provider that replies immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an artificial delay before every reply.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl ResponseProvider for SimulatedProvider {
    async fn respond(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(compose_reply(request))
    }
}

fn reply_pool(agent_id: AgentId) -> &'static [&'static str] {
    match agent_id {
        AgentId::DeepThinker => DEEP_THINKER_REPLIES,
        AgentId::CreativeGeneralist => CREATIVE_GENERALIST_REPLIES,
        AgentId::RationalJournalist => RATIONAL_JOURNALIST_REPLIES,
        AgentId::DeepCreator => DEEP_CREATOR_REPLIES,
    }
}

fn compose_reply(request: &ProviderRequest) -> String {
    let pool = reply_pool(request.agent_id);
    let index = request.message.chars().count() % pool.len();
    let name = agent::profile(request.agent_id).name;
    format!("{} [This is a simulated response from {}]", pool[index], name)
}
