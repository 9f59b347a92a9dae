//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Frame Errors
    // =========================================================================
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    #[error("Unsupported binary frame ({0} bytes)")]
    BinaryFrame(usize),

    // =========================================================================
    // Precondition Errors
    // =========================================================================
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Message is empty")]
    EmptyMessage,
}

impl DomainError {
    /// Get an error code string for logs and diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedFrame(_) => "MALFORMED_FRAME",
            Self::BinaryFrame(_) => "BINARY_FRAME",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::EmptyMessage => "EMPTY_MESSAGE",
        }
    }

    /// Check if this error concerns a single inbound frame.
    ///
    /// Frame errors drop the frame and never terminate the connection.
    pub fn is_frame_local(&self) -> bool {
        matches!(self, Self::MalformedFrame(_) | Self::BinaryFrame(_))
    }
}
