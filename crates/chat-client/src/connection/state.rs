//! Connection state

use std::fmt;

/// Connection state
///
/// Exactly one instance exists per [`ConnectionManager`](super::ConnectionManager);
/// only transport signals move it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    /// Connection requested, handshake pending
    #[default]
    Connecting,
    /// Handshake succeeded, frames flow both ways
    Open,
    /// Connection ended; a new attempt starts from Connecting
    Closed,
}

impl ConnectionState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Check if outbound frames may be sent
    #[inline]
    pub fn accepts_sends(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
