//! Application error types
//!
//! Unified error handling for the client process.

use crate::config::ConfigError;
use crate::telemetry::TracingError;
use chat_core::DomainError;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TracingError),

    // Connection errors
    #[error("Not connected")]
    NotConnected,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Gave up reconnecting after {0} attempts")]
    ReconnectExhausted(u32),

    // Terminal I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Telemetry(_) => "TELEMETRY_ERROR",
            Self::NotConnected => "NOT_CONNECTED",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::ReconnectExhausted(_) => "RECONNECT_EXHAUSTED",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if the error is fatal at start-up
    ///
    /// Everything after start-up is recovered by reconnecting or reported to the user.
    #[must_use]
    pub fn is_startup_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Telemetry(_))
    }

    /// Process exit code for the terminal client
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78,
            Self::ReconnectExhausted(_) => 69,
            _ => 1,
        }
    }

    /// Create a transport error from any displayable error
    #[must_use]
    pub fn transport(err: impl fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
