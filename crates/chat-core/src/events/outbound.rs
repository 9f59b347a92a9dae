//! Client-to-server events

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Events produced by local user actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundEvent {
    /// Post a chat message
    ChatMessage { message: String },

    /// Broadcast a transient notification
    PushNotification { text: String },
}

impl OutboundEvent {
    pub fn chat_message(message: impl Into<String>) -> Self {
        Self::ChatMessage {
            message: message.into(),
        }
    }

    pub fn push_notification(text: impl Into<String>) -> Self {
        Self::PushNotification { text: text.into() }
    }

    /// Build a chat message from raw composer input.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    /// Returns [`DomainError::EmptyMessage`] if nothing is left after trimming.
    pub fn compose_chat_message(input: &str) -> Result<Self, DomainError> {
        let message = input.trim();
        if message.is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        Ok(Self::chat_message(message))
    }

    /// Wire tag of this event
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::ChatMessage { .. } => "chat_message",
            Self::PushNotification { .. } => "push_notification",
        }
    }

    /// Serialize to a text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
