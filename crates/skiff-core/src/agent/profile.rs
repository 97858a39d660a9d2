//! Agent identities and their static catalog profiles.
//!
//! The catalog is a closed set: every routable agent is a variant of
//! [`AgentId`] with exactly one `static` [`AgentProfile`] record. Adding an
//! agent means adding a variant, a profile, and a `profile()` match arm;
//! the compiler then points at every site that needs to know about it.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Identifies one of the fixed agent personas a message can be routed to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AgentId {
    /// Analytical, philosophical reasoning.
    DeepThinker,
    /// Warm, conversational, versatile. The routing default.
    #[default]
    CreativeGeneralist,
    /// Factual, structured, clear.
    RationalJournalist,
    /// Innovative, boundary-pushing.
    DeepCreator,
}

/// Immutable presentation and accounting metadata for one agent.
///
/// Everything except `cost_per_token` is presentation-only; the ledger uses
/// `cost_per_token` as the accrual rate for that agent's recorded tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentProfile {
    pub id: AgentId,
    pub name: &'static str,
    pub role: &'static str,
    pub description: &'static str,
    /// Accent color as a `#rrggbb` hex string.
    pub color: &'static str,
    pub strengths: &'static [&'static str],
    /// Cost accrued per estimated token, in account currency units.
    pub cost_per_token: f64,
}

/// Fathom: Deep Thinker
///
/// Slow, deliberate reasoning for problems that reward depth over speed.
pub static FATHOM_PROFILE: AgentProfile = AgentProfile {
    id: AgentId::DeepThinker,
    name: "Fathom",
    role: "Deep Thinker",
    description: "Analytical, philosophical reasoning",
    color: "#9D7AFE",
    strengths: &["Analysis", "Logic", "Philosophy", "Complex reasoning"],
    cost_per_token: 0.003,
};

/// Breeze: Creative Generalist
///
/// The default conversational partner when no specialist pattern matches.
pub static BREEZE_PROFILE: AgentProfile = AgentProfile {
    id: AgentId::CreativeGeneralist,
    name: "Breeze",
    role: "Creative Generalist",
    description: "Warm, conversational, versatile",
    color: "#4ECDC4",
    strengths: &["Conversation", "Creativity", "Versatility", "Warmth"],
    cost_per_token: 0.001,
};

/// Sextant: Rational Journalist
///
/// Structured, source-minded answers for research and explanation requests.
pub static SEXTANT_PROFILE: AgentProfile = AgentProfile {
    id: AgentId::RationalJournalist,
    name: "Sextant",
    role: "Rational Journalist",
    description: "Factual, structured, clear",
    color: "#6EA1DA",
    strengths: &["Research", "Facts", "Structure", "Clarity"],
    cost_per_token: 0.002,
};

/// Corsair: Deep Creator
///
/// Takes creative briefs somewhere nobody asked it to go.
pub static CORSAIR_PROFILE: AgentProfile = AgentProfile {
    id: AgentId::DeepCreator,
    name: "Corsair",
    role: "Deep Creator",
    description: "Innovative, boundary-pushing",
    color: "#FF6EC7",
    strengths: &["Innovation", "Creativity", "Breakthrough thinking", "Art"],
    cost_per_token: 0.004,
};

/// Returns the static profile for an agent.
///
/// Total over [`AgentId`]; there is no agent without a catalog entry.
pub fn profile(id: AgentId) -> &'static AgentProfile {
    match id {
        AgentId::DeepThinker => &FATHOM_PROFILE,
        AgentId::CreativeGeneralist => &BREEZE_PROFILE,
        AgentId::RationalJournalist => &SEXTANT_PROFILE,
        AgentId::DeepCreator => &CORSAIR_PROFILE,
    }
}

/// Iterates over all agent profiles in catalog order.
pub fn all_profiles() -> impl Iterator<Item = &'static AgentProfile> {
    AgentId::iter().map(profile)
}
