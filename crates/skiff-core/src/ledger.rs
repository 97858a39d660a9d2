//! Per-agent usage accounting.
//!
//! The ledger tracks how many estimated tokens each agent has consumed and
//! the cost accrued at that agent's catalog rate. Counters only ever grow
//! within a session; failed exchanges are never recorded.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::agent::{self, AgentId};

/// Accumulated usage for a single agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCounter {
    /// Estimated tokens consumed, monotonically increasing.
    pub tokens_used: u64,
    /// Cost accrued at the agent's per-token rate, monotonically increasing.
    pub cost_accrued: f64,
}

/// Tracks token consumption and accrued cost per agent.
///
/// Reads hand out snapshot copies, never references into the ledger's own
/// state, so callers cannot bypass [`UsageLedger::record`].
#[derive(Debug, Clone, Default)]
pub struct UsageLedger {
    counters: HashMap<AgentId, UsageCounter>,
}

impl UsageLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `tokens` consumed by `agent_id`.
    ///
    /// Cost accrues incrementally at the agent's catalog rate; there is no
    /// operation that decreases either counter.
    pub fn record(&mut self, agent_id: AgentId, tokens: u64) {
        let counter = self.counters.entry(agent_id).or_default();
        counter.tokens_used += tokens;
        counter.cost_accrued += tokens as f64 * agent::profile(agent_id).cost_per_token;
    }

    /// Returns a snapshot of the counter for one agent.
    ///
    /// Agents that never consumed anything report a zeroed counter.
    pub fn counter(&self, agent_id: AgentId) -> UsageCounter {
        self.counters.get(&agent_id).copied().unwrap_or_default()
    }

    /// Returns a snapshot of every agent with recorded usage.
    pub fn snapshot(&self) -> HashMap<AgentId, UsageCounter> {
        self.counters.clone()
    }

    /// Total estimated tokens across all agents.
    pub fn total_tokens(&self) -> u64 {
        self.counters.values().map(|counter| counter.tokens_used).sum()
    }

    /// Total accrued cost across all agents.
    pub fn total_cost(&self) -> f64 {
        self.counters.values().map(|counter| counter.cost_accrued).sum()
    }
}

/// Estimates the token count of a piece of text.
///
/// Four characters per token, rounded up, with a floor of one. The formula
/// is deliberately simple and deterministic so ledger totals are
/// reproducible for a given conversation.
pub fn estimate_tokens(text: &str) -> u64 {
    (text.chars().count() as u64).div_ceil(4).max(1)
}
