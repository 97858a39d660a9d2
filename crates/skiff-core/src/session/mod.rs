//! Session domain module.
//!
//! This module contains the dispatch session model and the message types
//! that make up its transcript.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`DispatchSession`)
//! - `message`: Conversation message types (`MessageRole`, `Message`)
//!
//! # Usage
//!
//! ```ignore
//! use skiff_core::session::{DispatchSession, Message, MessageRole};
//! ```

mod message;
mod model;

// Re-export public API
pub use message::{Message, MessageRole};
pub use model::{DEFAULT_TEMPERATURE, DispatchSession};
