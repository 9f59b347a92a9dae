//! Consumer interface for connection output

use chat_core::InboundEvent;
use std::time::Duration;

/// Receives everything the connection produces, one call at a time
///
/// Calls arrive in transport order from a single dispatch loop; each returns
/// before the next frame is processed.
pub trait EventHandler: Send + Sync {
    /// Transport handshake completed
    fn on_open(&self) {}

    /// A decoded inbound event
    fn on_event(&self, event: InboundEvent);

    /// The transport reported an error; a close follows
    fn on_transport_error(&self, _error: &str) {}

    /// The connection closed.
    ///
    /// `retry_in` is the delay before the next attempt, or `None` when the
    /// reconnect policy has given up.
    fn on_connection_lost(&self, retry_in: Option<Duration>);
}
