//! # chat-client
//!
//! Real-time chat client: one persistent WebSocket connection, inbound event
//! routing into a message feed, and guarded outbound user actions.

pub mod chat;
pub mod cli;
pub mod connection;
pub mod error;
pub mod presentation;
pub mod protocol;
pub mod router;


pub use chat::{ActionOutcome, ChatSession, Rejection};
pub use connection::{
    ConnectionManager, ConnectionState, Connector, EventHandler, ReconnectHook, ReconnectPolicy,
    TransportLink, TransportPeer, TransportSignal, WsConnector,
};
pub use error::{ClientError, ClientResult};
pub use presentation::{
    FeedEntry, FeedPresenter, FeedState, InputField, Notification, NotificationId,
    NotificationPhase, Presenter, TerminalPresenter, TextPrompt,
};
pub use router::{EventRouter, NotificationCenter, NotificationTiming};
