//! Agent domain module.
//!
//! This module contains the fixed agent catalog and the keyword classifier
//! that routes inbound text to one of its members.
//!
//! # Module Structure
//!
//! - `profile`: Agent identity enum and static catalog (`AgentId`, `AgentProfile`)
//! - `classifier`: Keyword-precedence intent classification (`classify`)
//!
//! # Usage
//!
//! ```ignore
//! use skiff_core::agent::{AgentId, classify, profile};
//!
//! let agent = classify("analyze this");
//! let rate = profile(agent).cost_per_token;
//! ```

mod classifier;
mod profile;

// Re-export public API
pub use classifier::classify;
pub use profile::{
    AgentId, AgentProfile, BREEZE_PROFILE, CORSAIR_PROFILE, FATHOM_PROFILE, SEXTANT_PROFILE,
    all_profiles, profile,
};
