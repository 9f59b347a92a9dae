//! Client error types

use crate::router::advisory;
use chat_common::AppError;
use chat_core::DomainError;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Send attempted while the connection is not open
    #[error("Not connected")]
    NotConnected,

    /// WebSocket handshake or protocol failure
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// Outbound event could not be serialized
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Transport-level failure reported by a connector
    #[error("Transport error: {0}")]
    Transport(String),

    /// Reconnect policy ran out of attempts
    #[error("Gave up reconnecting after {0} attempts")]
    ReconnectExhausted(u32),

    /// Domain error
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl ClientError {
    /// Advisory shown when a send is rejected with this error
    ///
    /// Connection lifecycle advisories are rendered by the router as the
    /// lifecycle signals arrive; every other error is only logged.
    pub fn advisory(&self) -> Option<&'static str> {
        match self {
            Self::NotConnected => Some(advisory::CONNECTION_LOST),
            Self::Domain(DomainError::NotAuthenticated) => Some(advisory::PLEASE_LOGIN),
            Self::WebSocket(_)
            | Self::Transport(_)
            | Self::ReconnectExhausted(_)
            | Self::Encode(_)
            | Self::Domain(_) => None,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotConnected => Self::NotConnected,
            ClientError::ReconnectExhausted(attempts) => Self::ReconnectExhausted(attempts),
            ClientError::Domain(e) => Self::Domain(e),
            ClientError::Encode(e) => Self::internal(e),
            ClientError::WebSocket(e) => Self::transport(e),
            ClientError::Transport(msg) => Self::Transport(msg),
        }
    }
}

/// Client result type
pub type ClientResult<T> = Result<T, ClientError>;
