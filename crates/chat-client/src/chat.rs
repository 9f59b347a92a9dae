//! Chat session
//!
//! Ties one [`Session`], one [`ConnectionManager`] and one [`EventRouter`]
//! together and exposes the guarded user actions.

use crate::connection::{ConnectionManager, ConnectionState, Connector, ReconnectPolicy};
use crate::error::{ClientError, ClientResult};
use crate::presentation::{InputField, Presenter, TextPrompt};
use crate::router::{EventRouter, NotificationTiming};
use chat_common::ClientConfig;
use chat_core::{DomainError, OutboundEvent, Session};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Label shown when asking for notification text
pub const NOTIFICATION_PROMPT: &str = "Enter notification text:";

/// Result of a user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Frame handed to the transport
    Sent,
    /// Nothing to send; no feedback
    Discarded,
    /// Precondition failed; the user was alerted
    Rejected(Rejection),
}

/// Why an action was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotAuthenticated,
    NotConnected,
}

impl Rejection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not_authenticated",
            Self::NotConnected => "not_connected",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A running chat client
///
/// Dropping the session stops its connection and aborts pending timers.
pub struct ChatSession {
    session: Arc<Session>,
    manager: Arc<ConnectionManager>,
    router: Arc<EventRouter>,
    presenter: Arc<dyn Presenter>,
    shutdown: watch::Sender<bool>,
    finished: watch::Receiver<bool>,
    worker: Option<JoinHandle<ClientResult<()>>>,
}

impl ChatSession {
    /// Start a session from configuration.
    ///
    /// Must be called within a tokio runtime.
    pub fn start(
        config: &ClientConfig,
        presenter: Arc<dyn Presenter>,
        connector: Arc<dyn Connector>,
    ) -> Self {
        let session = Session::from_username(config.identity.username.as_deref());
        let manager = ConnectionManager::new(
            config.server.url(),
            connector,
            ReconnectPolicy::from(&config.reconnect),
        );

        Self::start_with(
            session,
            manager,
            presenter,
            NotificationTiming::from(&config.notification),
        )
    }

    /// Start a session around an already configured manager
    pub fn start_with(
        session: Session,
        manager: ConnectionManager,
        presenter: Arc<dyn Presenter>,
        timing: NotificationTiming,
    ) -> Self {
        let session = Arc::new(session);
        let manager = Arc::new(manager);
        let router = Arc::new(EventRouter::new(session.clone(), presenter.clone(), timing));

        let (shutdown, shutdown_rx) = watch::channel(false);
        let (finished_tx, finished) = watch::channel(false);

        tracing::info!(
            url = %manager.url(),
            authenticated = session.is_authenticated,
            username = %session.username,
            "Starting chat session"
        );

        let worker = tokio::spawn({
            let manager = manager.clone();
            let router = router.clone();
            async move {
                let result = manager.run(router.as_ref(), shutdown_rx).await;
                if let Err(e) = &result {
                    tracing::error!(error = %e, "Chat session ended");
                }
                let _ = finished_tx.send(true);
                result
            }
        });

        Self {
            session,
            manager,
            router,
            presenter,
            shutdown,
            finished,
            worker: Some(worker),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.manager.state()
    }

    pub fn is_ready(&self) -> bool {
        self.manager.is_ready()
    }

    pub fn manager(&self) -> &ConnectionManager {
        &self.manager
    }

    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    /// Send the composer contents as a chat message.
    ///
    /// The input is cleared only when a frame was sent.
    pub fn send_chat_message(&self, input: &mut dyn InputField) -> ActionOutcome {
        if let Err(e) = self.session.require_authenticated() {
            return self.reject(&e.into());
        }
        if !self.manager.is_ready() {
            return self.reject(&ClientError::NotConnected);
        }

        let event = match OutboundEvent::compose_chat_message(input.text()) {
            Ok(event) => event,
            Err(DomainError::EmptyMessage) => return ActionOutcome::Discarded,
            Err(e) => return self.reject(&e.into()),
        };

        match self.manager.send(&event) {
            Ok(()) => {
                input.clear();
                ActionOutcome::Sent
            }
            Err(e) => self.reject(&e),
        }
    }

    /// Prompt for text and broadcast it as a push notification.
    ///
    /// The text is sent as typed.
    pub fn send_notification(&self, prompt: &mut dyn TextPrompt) -> ActionOutcome {
        if !self.manager.is_ready() {
            return self.reject(&ClientError::NotConnected);
        }

        let Some(text) = prompt.prompt(NOTIFICATION_PROMPT) else {
            return ActionOutcome::Discarded;
        };
        if text.is_empty() {
            return ActionOutcome::Discarded;
        }

        match self.manager.send(&OutboundEvent::push_notification(text)) {
            Ok(()) => ActionOutcome::Sent,
            Err(e) => self.reject(&e),
        }
    }

    /// Resolves once the connection loop has stopped
    pub async fn closed(&self) {
        let mut finished = self.finished.clone();
        let _ = finished.wait_for(|done| *done).await;
    }

    /// Close the connection, cancel timers, and wait for the loop to stop
    ///
    /// # Errors
    /// Returns the loop's error if it had already stopped with one.
    pub async fn shutdown(mut self) -> ClientResult<()> {
        tracing::info!("Shutting down chat session");
        let _ = self.shutdown.send(true);
        self.router.notifications().cancel_all();

        match self.worker.take() {
            Some(worker) => match worker.await {
                Ok(result) => result,
                Err(e) => Err(ClientError::Transport(format!("connection task failed: {e}"))),
            },
            None => Ok(()),
        }
    }

    fn reject(&self, err: &ClientError) -> ActionOutcome {
        let rejection = match err {
            ClientError::Domain(DomainError::NotAuthenticated) => Rejection::NotAuthenticated,
            _ => Rejection::NotConnected,
        };

        tracing::info!(reason = %rejection, error = %err, "Action rejected");
        if let Some(text) = err.advisory() {
            self.presenter.alert(text);
        }

        ActionOutcome::Rejected(rejection)
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
        self.router.notifications().cancel_all();
    }
}

impl fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSession")
            .field("session", &self.session)
            .field("manager", &self.manager)
            .finish_non_exhaustive()
    }
}
