//! Provider boundary for the skiff workspace.
//!
//! This crate defines the [`ResponseProvider`] contract the dispatcher is
//! written against, plus its two implementations: a zero-network local
//! simulation and an HTTP relay.

pub mod provider;
pub mod relay;
pub mod simulated;

// Re-export public API
pub use provider::{ProviderError, ProviderRequest, ResponseProvider};
pub use relay::RelayProvider;
pub use simulated::SimulatedProvider;
