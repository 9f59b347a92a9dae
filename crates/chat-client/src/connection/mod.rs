//! Connection management
//!
//! Owns the single transport connection, its state machine, and reconnection.

mod handler;
mod manager;
mod reconnect;
mod state;
mod transport;
mod websocket;

pub use handler::EventHandler;
pub use manager::ConnectionManager;
pub use reconnect::{ReconnectHook, ReconnectPolicy};
pub use state::ConnectionState;
pub use transport::{Connector, TransportLink, TransportPeer, TransportSignal};
pub use websocket::WsConnector;
