//! Session entity - the identity of the local user

use super::Ownership;
use crate::error::DomainError;

/// Local user session
///
/// Supplied by the identity provider once at start-up and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub is_authenticated: bool,
    pub username: String,
}

impl Session {
    /// Create an authenticated session for `username`
    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            username: username.into(),
        }
    }

    /// Create a guest session that may read but not post
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build a session from an optional username.
    ///
    /// Blank usernames yield an anonymous session.
    pub fn from_username(username: Option<&str>) -> Self {
        match username.map(str::trim) {
            Some(name) if !name.is_empty() => Self::authenticated(name),
            _ => Self::anonymous(),
        }
    }

    /// Gate for actions that require a logged-in user
    ///
    /// # Errors
    /// Returns [`DomainError::NotAuthenticated`] for guest sessions.
    pub fn require_authenticated(&self) -> Result<(), DomainError> {
        if self.is_authenticated {
            Ok(())
        } else {
            Err(DomainError::NotAuthenticated)
        }
    }

    /// Classify a message author relative to this session
    #[inline]
    pub fn ownership_of(&self, username: &str) -> Ownership {
        if username == self.username {
            Ownership::Own
        } else {
            Ownership::Other
        }
    }
}
