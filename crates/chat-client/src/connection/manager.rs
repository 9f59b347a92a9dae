//! Connection manager
//!
//! Owns the single live connection: opens it, tracks its state, forwards
//! decoded frames to one [`EventHandler`], and reopens it after it closes.

use super::handler::EventHandler;
use super::reconnect::{ReconnectHook, ReconnectPolicy};
use super::state::ConnectionState;
use super::transport::{Connector, TransportLink, TransportSignal};
use crate::error::{ClientError, ClientResult};
use crate::protocol::{decode_frame, encode_event, Frame};
use chat_core::OutboundEvent;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Manages the connection to the chat channel
pub struct ConnectionManager {
    url: String,
    connector: Arc<dyn Connector>,
    policy: ReconnectPolicy,
    hook: Option<Arc<dyn ReconnectHook>>,
    state: RwLock<ConnectionState>,
    /// Writer of the current link; present only between connect and close
    writer: Mutex<Option<mpsc::UnboundedSender<String>>>,
    attempts: AtomicU32,
}

impl ConnectionManager {
    /// Create a new manager; nothing is opened until [`run`](Self::run)
    pub fn new(url: impl Into<String>, connector: Arc<dyn Connector>, policy: ReconnectPolicy) -> Self {
        Self {
            url: url.into(),
            connector,
            policy,
            hook: None,
            state: RwLock::new(ConnectionState::Connecting),
            writer: Mutex::new(None),
            attempts: AtomicU32::new(0),
        }
    }

    /// Install a hook that runs before every reconnect attempt
    #[must_use]
    pub fn with_reconnect_hook(mut self, hook: Arc<dyn ReconnectHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    /// Total number of connection attempts made so far
    pub fn connection_attempts(&self) -> u32 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Check if an outbound frame would be handed to the transport right now
    pub fn is_ready(&self) -> bool {
        self.state().accepts_sends()
            && self
                .writer
                .lock()
                .as_ref()
                .is_some_and(|writer| !writer.is_closed())
    }

    /// Send one event over the open connection.
    ///
    /// Fire-and-forget: success means the frame was handed to the transport.
    ///
    /// # Errors
    /// Returns [`ClientError::NotConnected`] unless the connection is open;
    /// the transport is not touched in that case.
    pub fn send(&self, event: &OutboundEvent) -> ClientResult<()> {
        let state = self.state();
        if !state.accepts_sends() {
            tracing::warn!(event_type = event.event_type(), state = %state, "Send rejected: connection not open");
            return Err(ClientError::NotConnected);
        }

        let frame = encode_event(event)?;

        let writer = self.writer.lock();
        let Some(writer) = writer.as_ref() else {
            tracing::warn!(event_type = event.event_type(), "Send rejected: no transport");
            return Err(ClientError::NotConnected);
        };

        writer.send(frame).map_err(|_| ClientError::NotConnected)?;

        tracing::debug!(event_type = event.event_type(), "Frame sent");
        Ok(())
    }

    /// Run the connection until shutdown or until the reconnect policy gives up.
    ///
    /// Every frame, error and close is reported to `handler` from this one
    /// loop, in transport order. Setting `shutdown` to `true` (or dropping its
    /// sender) closes the current connection and cancels any pending reconnect.
    ///
    /// # Errors
    /// Returns [`ClientError::ReconnectExhausted`] when no attempts remain.
    pub async fn run(
        &self,
        handler: &dyn EventHandler,
        mut shutdown: watch::Receiver<bool>,
    ) -> ClientResult<()> {
        let mut attempt = 0u32;

        loop {
            if *shutdown.borrow() {
                break;
            }

            self.set_state(ConnectionState::Connecting);

            let was_open = tokio::select! {
                was_open = self.run_connection(handler) => was_open,
                () = wait_for_shutdown(&mut shutdown) => {
                    tracing::info!("Shutdown requested, closing connection");
                    self.teardown();
                    break;
                }
            };

            // A connection that reached Open starts a fresh series
            if was_open {
                attempt = 0;
            }
            attempt += 1;

            let Some(delay) = self.policy.delay_for_attempt(attempt) else {
                let attempts = attempt - 1;
                tracing::error!(attempts, "Reconnect attempts exhausted");
                handler.on_connection_lost(None);
                return Err(ClientError::ReconnectExhausted(attempts));
            };

            tracing::info!(
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Connection lost, reconnect scheduled"
            );
            handler.on_connection_lost(Some(delay));

            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                () = wait_for_shutdown(&mut shutdown) => {
                    tracing::info!("Shutdown requested, reconnect cancelled");
                    break;
                }
            }

            if let Some(hook) = &self.hook {
                hook.before_reconnect(attempt);
            }
            tracing::info!(attempt, url = %self.url, "Reconnecting");
        }

        self.set_state(ConnectionState::Closed);
        tracing::info!("Connection manager stopped");
        Ok(())
    }

    /// Drive one connection from connect to close; returns whether it reached Open
    async fn run_connection(&self, handler: &dyn EventHandler) -> bool {
        self.attempts.fetch_add(1, Ordering::Relaxed);

        let link = match self.connector.connect(&self.url).await {
            Ok(link) => link,
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "Connection attempt failed");
                self.set_state(ConnectionState::Closed);
                handler.on_transport_error(&e.to_string());
                return false;
            }
        };

        let TransportLink {
            outbound,
            mut signals,
            task,
        } = link;
        *self.writer.lock() = Some(outbound);

        let mut was_open = false;

        while let Some(signal) = signals.recv().await {
            match signal {
                TransportSignal::Open => {
                    self.set_state(ConnectionState::Open);
                    was_open = true;
                    tracing::info!(url = %self.url, "Connection open");
                    handler.on_open();
                }
                TransportSignal::Frame(text) => self.dispatch(handler, Frame::Text(&text)),
                TransportSignal::Binary(data) => self.dispatch(handler, Frame::Binary(&data)),
                TransportSignal::Error(error) => {
                    tracing::warn!(error = %error, "Transport error");
                    self.set_state(ConnectionState::Closed);
                    handler.on_transport_error(&error);
                }
                TransportSignal::Closed(reason) => {
                    tracing::info!(reason = ?reason, "Connection closed");
                    break;
                }
            }
        }

        self.teardown();

        // The old link must be fully gone before a new attempt starts
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Transport task ended abnormally");
            }
        }

        was_open
    }

    /// Decode one frame and hand it to the handler; bad frames are dropped
    fn dispatch(&self, handler: &dyn EventHandler, frame: Frame<'_>) {
        let state = self.state();
        if !state.accepts_sends() {
            tracing::debug!(state = %state, "Frame received outside Open, dropped");
            return;
        }

        match decode_frame(frame) {
            Ok(event) => {
                tracing::trace!(
                    event_type = event.event_type(),
                    known = event.is_known(),
                    "Frame received"
                );
                handler.on_event(event);
            }
            Err(e) => {
                tracing::warn!(error = %e, code = e.code(), "Dropping undecodable frame");
            }
        }
    }

    fn set_state(&self, state: ConnectionState) {
        let mut current = self.state.write();
        if *current != state {
            tracing::debug!(from = %*current, to = %state, "Connection state changed");
            *current = state;
        }
    }

    fn teardown(&self) {
        self.writer.lock().take();
        self.set_state(ConnectionState::Closed);
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("url", &self.url)
            .field("policy", &self.policy)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Resolves once shutdown is requested or the sender is gone
async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}
