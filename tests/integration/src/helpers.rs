//! Test helpers for integration tests
//!
//! Provides an in-process WebSocket server standing in for the chat server,
//! client configuration pointing at it, and polling utilities.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chat_common::{
    AppSettings, ClientConfig, Environment, IdentityConfig, NotificationConfig, ReconnectConfig,
    ServerConfig,
};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, WebSocketStream};

/// Default time to wait for anything the test expects to happen
pub const WAIT: Duration = Duration::from_secs(5);

/// Reconnect delay used by test clients
pub const TEST_RECONNECT_DELAY_MS: u64 = 500;

/// Test server that hands every accepted WebSocket to the test
pub struct TestServer {
    pub addr: SocketAddr,
    connections: mpsc::UnboundedReceiver<ServerConnection>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on an ephemeral port
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let Ok(socket) = accept_async(stream).await else {
                    continue;
                };
                if tx.send(ServerConnection { socket }).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            addr,
            connections: rx,
            _handle: handle,
        })
    }

    /// Client configuration pointing at this server
    pub fn config(&self, username: Option<&str>) -> ClientConfig {
        ClientConfig {
            app: AppSettings {
                name: "chat-client-test".to_string(),
                env: Environment::Development,
            },
            server: ServerConfig {
                host: self.addr.to_string(),
                secure: false,
                path: "/ws/chat/".to_string(),
            },
            identity: IdentityConfig {
                username: username.map(str::to_string),
            },
            reconnect: ReconnectConfig {
                delay_ms: TEST_RECONNECT_DELAY_MS,
                max_delay_ms: TEST_RECONNECT_DELAY_MS,
                multiplier: 1,
                max_attempts: None,
            },
            notification: NotificationConfig::default(),
        }
    }

    /// Wait for the next client connection
    pub async fn accept(&mut self) -> Result<ServerConnection> {
        tokio::time::timeout(WAIT, self.connections.recv())
            .await
            .map_err(|_| anyhow!("timed out waiting for a client connection"))?
            .ok_or_else(|| anyhow!("test server stopped"))
    }

    /// Check that no client connects within `window`
    pub async fn expect_no_connection(&mut self, window: Duration) -> bool {
        tokio::time::timeout(window, self.connections.recv())
            .await
            .is_err()
    }
}

/// Server side of one client connection
pub struct ServerConnection {
    socket: WebSocketStream<TcpStream>,
}

impl ServerConnection {
    /// Send a raw text frame
    pub async fn send_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.socket.send(Message::Text(text.into())).await?;
        Ok(())
    }

    /// Send a binary frame
    pub async fn send_binary(&mut self, data: Vec<u8>) -> Result<()> {
        self.socket.send(Message::Binary(data)).await?;
        Ok(())
    }

    /// Next text frame from the client; `None` once the client closed
    pub async fn recv_text(&mut self) -> Result<Option<String>> {
        let next = async {
            while let Some(message) = self.socket.next().await {
                match message? {
                    Message::Text(text) => return Ok(Some(text)),
                    Message::Close(_) => return Ok(None),
                    _ => {}
                }
            }
            Ok::<_, anyhow::Error>(None)
        };

        tokio::time::timeout(WAIT, next)
            .await
            .map_err(|_| anyhow!("timed out waiting for a client frame"))?
    }

    /// Next text frame parsed as JSON
    pub async fn recv_json(&mut self) -> Result<serde_json::Value> {
        let text = self
            .recv_text()
            .await?
            .ok_or_else(|| anyhow!("client closed the connection"))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Check that the client sends nothing within `window`
    pub async fn expect_silence(&mut self, window: Duration) -> bool {
        matches!(
            tokio::time::timeout(window, self.socket.next()).await,
            Err(_) | Ok(Some(Ok(Message::Ping(_) | Message::Pong(_))))
        )
    }

    /// Send a Close frame and report whether the client answered with its own
    pub async fn close_expecting_reply(mut self) -> Result<bool> {
        self.socket.send(Message::Close(None)).await?;
        loop {
            match tokio::time::timeout(WAIT, self.socket.next()).await {
                Ok(Some(Ok(Message::Close(_)))) => return Ok(true),
                Ok(Some(Ok(Message::Ping(_) | Message::Pong(_)))) => {}
                Ok(Some(Ok(other))) => return Err(anyhow!("unexpected frame: {other:?}")),
                Ok(Some(Err(e))) => return Err(e.into()),
                Ok(None) => return Ok(false),
                Err(_) => return Err(anyhow!("timed out waiting for the close reply")),
            }
        }
    }

    /// Close the connection from the server side
    pub async fn close(mut self) -> Result<()> {
        self.socket.close(None).await?;
        // Drain until the client acknowledges
        while let Ok(Some(_)) = tokio::time::timeout(WAIT, self.socket.next()).await {}
        Ok(())
    }
}

/// Poll `condition` until it holds or [`WAIT`] elapses
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + WAIT;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
