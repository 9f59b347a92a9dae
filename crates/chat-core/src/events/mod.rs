//! Wire events exchanged with the chat server
//!
//! Every frame is a flat JSON object carrying a `type` discriminator.

mod inbound;
mod outbound;

pub use inbound::InboundEvent;
pub use outbound::OutboundEvent;
