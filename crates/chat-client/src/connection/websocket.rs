//! WebSocket transport
//!
//! Drives a `tokio-tungstenite` socket on its own task and bridges it to a
//! [`TransportLink`].

use super::transport::{Connector, TransportLink, TransportPeer, TransportSignal};
use crate::error::ClientResult;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Upper bound for flushing our Close reply to the server
const CLOSE_REPLY_TIMEOUT: Duration = Duration::from_secs(1);

/// Connector for `ws://` and `wss://` endpoints
#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

impl WsConnector {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self, url: &str) -> ClientResult<TransportLink> {
        let (socket, response) = connect_async(url).await?;

        tracing::debug!(url = %url, status = %response.status(), "WebSocket handshake complete");

        let (link, peer) = TransportLink::pair();
        let task = tokio::spawn(pump(socket, peer));

        Ok(link.with_task(task))
    }
}

/// Move frames between the socket and the link until either side closes
async fn pump(mut socket: Socket, mut peer: TransportPeer) {
    peer.signal(TransportSignal::Open);

    let mut close_reason = None;

    loop {
        tokio::select! {
            outbound = peer.outbound.recv() => {
                match outbound {
                    Some(text) => {
                        if let Err(e) = socket.send(Message::Text(text)).await {
                            tracing::warn!(error = %e, "Failed to send frame");
                            peer.signal(TransportSignal::Error(e.to_string()));
                            break;
                        }
                    }
                    None => {
                        // Link dropped: local shutdown or reconnect teardown
                        tracing::debug!("Closing WebSocket");
                        let _ = socket.close(None).await;
                        break;
                    }
                }
            }
            inbound = socket.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        peer.signal(TransportSignal::Frame(text));
                    }
                    Some(Ok(Message::Binary(data))) => {
                        peer.signal(TransportSignal::Binary(data));
                    }
                    Some(Ok(Message::Ping(_))) => {
                        tracing::trace!("Ping received");
                    }
                    Some(Ok(Message::Pong(_))) => {
                        tracing::trace!("Pong received");
                    }
                    Some(Ok(Message::Close(frame))) => {
                        close_reason = frame
                            .map(|f| f.reason.to_string())
                            .filter(|reason| !reason.is_empty());
                        tracing::info!(reason = ?close_reason, "Server closed connection");
                        finish_close_handshake(&mut socket).await;
                        break;
                    }
                    Some(Ok(Message::Frame(_))) => {}
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "WebSocket error");
                        peer.signal(TransportSignal::Error(e.to_string()));
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    peer.signal(TransportSignal::Closed(close_reason));
}

/// Flush the Close reply tungstenite queued for a peer-initiated close
async fn finish_close_handshake(socket: &mut Socket) {
    let reply = async {
        if let Err(e) = socket.close(None).await {
            tracing::debug!(error = %e, "Close reply not delivered");
        }
        // Drive the stream to its end so the reply is on the wire
        while let Some(Ok(_)) = socket.next().await {}
    };

    if tokio::time::timeout(CLOSE_REPLY_TIMEOUT, reply).await.is_err() {
        tracing::debug!("Timed out completing close handshake");
    }
}
