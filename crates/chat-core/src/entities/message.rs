//! Message entity - a chat message as rendered in the feed

use serde::{Deserialize, Serialize};

/// Whether a message was written by the local user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ownership {
    Own,
    Other,
}

impl Ownership {
    /// Style class used by presenters ("own" / "other")
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Own => "own",
            Self::Other => "other",
        }
    }

    #[inline]
    pub fn is_own(self) -> bool {
        matches!(self, Self::Own)
    }
}

/// Chat message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub username: String,
    pub ownership: Ownership,
}

impl ChatMessage {
    /// Create a new ChatMessage
    pub fn new(text: impl Into<String>, username: impl Into<String>, ownership: Ownership) -> Self {
        Self {
            text: text.into(),
            username: username.into(),
            ownership,
        }
    }

    /// Check if the local user wrote this message
    #[inline]
    pub fn is_own(&self) -> bool {
        self.ownership.is_own()
    }
}
