//! Transport abstraction
//!
//! A connector opens one link; the link exposes an outbound text channel and
//! an ordered stream of lifecycle signals and frames.

use crate::error::ClientResult;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Signals emitted by a live transport, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportSignal {
    /// Handshake completed
    Open,
    /// A text frame
    Frame(String),
    /// A binary frame (unsupported by the protocol)
    Binary(Vec<u8>),
    /// Transport error; `Closed` follows
    Error(String),
    /// Connection ended, with the peer's close reason if any
    Closed(Option<String>),
}

/// Opens transport links
#[async_trait]
pub trait Connector: Send + Sync {
    /// Open a new link to `url`
    async fn connect(&self, url: &str) -> ClientResult<TransportLink>;
}

/// One open transport connection, as seen by the connection manager
#[derive(Debug)]
pub struct TransportLink {
    /// Outbound text frames; dropping it asks the transport to close
    pub outbound: mpsc::UnboundedSender<String>,
    /// Inbound signals; ends after `Closed`
    pub signals: mpsc::UnboundedReceiver<TransportSignal>,
    /// Task driving the underlying socket, joined on close
    pub task: Option<JoinHandle<()>>,
}

/// The transport side of a [`TransportLink`]
#[derive(Debug)]
pub struct TransportPeer {
    /// Frames written by the client
    pub outbound: mpsc::UnboundedReceiver<String>,
    /// Signals delivered to the client
    pub signals: mpsc::UnboundedSender<TransportSignal>,
}

impl TransportLink {
    /// Create a connected link/peer pair with no driving task
    #[must_use]
    pub fn pair() -> (Self, TransportPeer) {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (signals_tx, signals_rx) = mpsc::unbounded_channel();

        (
            Self {
                outbound: outbound_tx,
                signals: signals_rx,
                task: None,
            },
            TransportPeer {
                outbound: outbound_rx,
                signals: signals_tx,
            },
        )
    }

    /// Attach the task that drives this link
    #[must_use]
    pub fn with_task(mut self, task: JoinHandle<()>) -> Self {
        self.task = Some(task);
        self
    }
}

impl TransportPeer {
    /// Emit a signal; returns false once the link has been dropped
    pub fn signal(&self, signal: TransportSignal) -> bool {
        self.signals.send(signal).is_ok()
    }
}
