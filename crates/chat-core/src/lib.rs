//! # chat-core
//!
//! Domain layer for the chat client: the local session, the wire events exchanged
//! with the chat server, and domain errors.
//! This crate has zero dependencies on infrastructure (transport, runtime, terminal, etc.).

pub mod entities;
pub mod error;
pub mod events;

// Re-export commonly used types at crate root
pub use entities::{ChatMessage, Ownership, Session};
pub use error::DomainError;
pub use events::{InboundEvent, OutboundEvent};
