//! Inbound event routing
//!
//! Maps each decoded event to its effect on the feed. Stateless apart from
//! notification timers; runs synchronously inside the dispatch loop.

pub mod advisory;
mod notifications;

pub use notifications::{NotificationCenter, NotificationTiming};

use crate::connection::EventHandler;
use crate::presentation::Presenter;
use chat_core::{ChatMessage, InboundEvent, Session};
use std::sync::Arc;
use std::time::Duration;

/// Routes inbound events to the presenter
pub struct EventRouter {
    session: Arc<Session>,
    presenter: Arc<dyn Presenter>,
    notifications: NotificationCenter,
}

impl EventRouter {
    pub fn new(session: Arc<Session>, presenter: Arc<dyn Presenter>, timing: NotificationTiming) -> Self {
        let notifications = NotificationCenter::new(presenter.clone(), timing);
        Self {
            session,
            presenter,
            notifications,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Apply one inbound event
    pub fn dispatch(&self, event: InboundEvent) {
        match event {
            InboundEvent::OnlineCount { count } => {
                self.presenter.set_online_count(count);
            }
            InboundEvent::ChatMessage { message, username } => {
                let ownership = self.session.ownership_of(&username);
                self.presenter
                    .render_message(&ChatMessage::new(message, username, ownership));
            }
            InboundEvent::PushNotification { text, sender } => {
                self.notifications.show(&sender, &text);
            }
            InboundEvent::UserJoin { username } => {
                self.presenter
                    .render_system(&format!("{username} joined the chat"));
            }
            InboundEvent::UserLeave { username } => {
                self.presenter
                    .render_system(&format!("{username} left the chat"));
            }
            InboundEvent::Error { message } => {
                tracing::info!(message = %message, "Server reported an error");
                self.presenter.alert(&message);
            }
            InboundEvent::Unknown => {
                tracing::debug!("Ignoring event with unknown type");
            }
        }
    }
}

impl EventHandler for EventRouter {
    fn on_open(&self) {
        tracing::debug!("Router attached to open connection");
    }

    fn on_event(&self, event: InboundEvent) {
        self.dispatch(event);
    }

    fn on_transport_error(&self, _error: &str) {
        self.presenter.render_system(advisory::CONNECTION_ERROR);
    }

    fn on_connection_lost(&self, retry_in: Option<Duration>) {
        match retry_in {
            Some(delay) => self
                .presenter
                .render_system(&advisory::reconnecting_in(delay)),
            None => self.presenter.render_system(advisory::RECONNECT_EXHAUSTED),
        }
    }
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRouter")
            .field("session", &self.session)
            .field("notifications", &self.notifications)
            .finish_non_exhaustive()
    }
}
