//! Server-to-client events

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Events delivered by the chat server
///
/// Tags outside the known set decode to [`InboundEvent::Unknown`] and are
/// ignored by the router; they are not decode errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    /// Number of users currently connected
    OnlineCount { count: u64 },

    /// A chat message posted by any user, including the local one
    ChatMessage { message: String, username: String },

    /// A transient notification broadcast by another user
    PushNotification { text: String, sender: String },

    /// A user connected to the chat
    UserJoin { username: String },

    /// A user disconnected from the chat
    UserLeave { username: String },

    /// Application-level error reported by the server
    Error { message: String },

    #[serde(other)]
    Unknown,
}

impl InboundEvent {
    /// Decode one text frame
    ///
    /// # Errors
    /// Returns [`DomainError::MalformedFrame`] if the frame is not a JSON object
    /// with a `type` tag, or a known tag is missing its fields.
    pub fn from_json(text: &str) -> Result<Self, DomainError> {
        serde_json::from_str(text).map_err(|e| DomainError::MalformedFrame(e.to_string()))
    }

    /// Wire tag of this event
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::OnlineCount { .. } => "online_count",
            Self::ChatMessage { .. } => "chat_message",
            Self::PushNotification { .. } => "push_notification",
            Self::UserJoin { .. } => "user_join",
            Self::UserLeave { .. } => "user_leave",
            Self::Error { .. } => "error",
            Self::Unknown => "unknown",
        }
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}
