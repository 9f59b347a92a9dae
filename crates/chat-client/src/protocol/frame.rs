//! Frame codec
//!
//! Converts between transport frames and typed events.

use chat_core::{DomainError, InboundEvent, OutboundEvent};

/// A frame as delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame<'a> {
    Text(&'a str),
    Binary(&'a [u8]),
}

/// Decode one inbound frame into an event
///
/// Unknown `type` tags decode successfully to [`InboundEvent::Unknown`].
///
/// # Errors
/// Returns a frame-local [`DomainError`] for binary or malformed frames.
pub fn decode_frame(frame: Frame<'_>) -> Result<InboundEvent, DomainError> {
    match frame {
        Frame::Text(text) => InboundEvent::from_json(text),
        Frame::Binary(bytes) => Err(DomainError::BinaryFrame(bytes.len())),
    }
}

/// Encode an outbound event as a text frame
pub fn encode_event(event: &OutboundEvent) -> Result<String, serde_json::Error> {
    event.to_json()
}
