//! Keyword-based intent classification.
//!
//! Routing is a fixed-precedence keyword scan, not a model call: analytical
//! patterns outrank research patterns, which outrank creative patterns, and
//! anything else falls through to the conversational default. Matching is
//! case-insensitive substring containment, so "Analyzes" matches "analyze".

use super::profile::AgentId;

/// Patterns that indicate deep analytical work.
const ANALYTICAL_KEYWORDS: &[&str] = &["analyze", "philosophy", "complex", "logic"];

/// Patterns that indicate research or explanation requests.
const RESEARCH_KEYWORDS: &[&str] = &["research", "fact", "explain", "how does"];

/// Patterns that indicate creative or generative requests.
const CREATIVE_KEYWORDS: &[&str] = &["create", "design", "innovative", "art"];

/// Classifies free-form input text to the agent best suited to answer it.
///
/// Deterministic and total: the same text always classifies to the same
/// agent, and there is always an answer. When keywords from several
/// categories appear, the highest-precedence category wins (analytical,
/// then research, then creative).
pub fn classify(text: &str) -> AgentId {
    let lower = text.to_lowercase();

    if contains_any(&lower, ANALYTICAL_KEYWORDS) {
        AgentId::DeepThinker
    } else if contains_any(&lower, RESEARCH_KEYWORDS) {
        AgentId::RationalJournalist
    } else if contains_any(&lower, CREATIVE_KEYWORDS) {
        AgentId::DeepCreator
    } else {
        AgentId::CreativeGeneralist
    }
}

fn contains_any(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| lower.contains(keyword))
}
