//! Domain entities - the local session and rendered chat messages

mod message;
mod session;

pub use message::{ChatMessage, Ownership};
pub use session::Session;
