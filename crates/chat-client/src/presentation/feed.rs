//! In-memory feed
//!
//! Holds everything a chat window would show, for embedding and tests.

use super::{Notification, NotificationId, Presenter};
use chat_core::ChatMessage;
use parking_lot::Mutex;

/// One line of the message feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEntry {
    Message(ChatMessage),
    System(String),
}

/// Display phase of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Visible,
    /// Exit transition running
    Hiding,
}

/// Snapshot of the UI-observable state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    pub entries: Vec<FeedEntry>,
    /// Online count label; empty until the first count arrives
    pub online_count: String,
    pub notifications: Vec<(Notification, NotificationPhase)>,
    pub alerts: Vec<String>,
}

impl FeedState {
    /// Chat messages in arrival order
    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter().filter_map(|entry| match entry {
            FeedEntry::Message(message) => Some(message),
            FeedEntry::System(_) => None,
        })
    }

    /// System lines in arrival order
    pub fn system_lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            FeedEntry::System(text) => Some(text.as_str()),
            FeedEntry::Message(_) => None,
        })
    }

    pub fn notification_phase(&self, id: NotificationId) -> Option<NotificationPhase> {
        self.notifications
            .iter()
            .find(|(notification, _)| notification.id == id)
            .map(|(_, phase)| *phase)
    }
}

/// Presenter that records state instead of drawing it
#[derive(Debug, Default)]
pub struct FeedPresenter {
    state: Mutex<FeedState>,
}

impl FeedPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> FeedState {
        self.state.lock().clone()
    }
}

impl Presenter for FeedPresenter {
    fn render_message(&self, message: &ChatMessage) {
        self.state
            .lock()
            .entries
            .push(FeedEntry::Message(message.clone()));
    }

    fn render_system(&self, text: &str) {
        self.state
            .lock()
            .entries
            .push(FeedEntry::System(text.to_string()));
    }

    fn show_notification(&self, notification: &Notification) {
        self.state
            .lock()
            .notifications
            .push((notification.clone(), NotificationPhase::Visible));
    }

    fn dismiss_notification(&self, id: NotificationId) {
        let mut state = self.state.lock();
        if let Some((_, phase)) = state.notifications.iter_mut().find(|(n, _)| n.id == id) {
            *phase = NotificationPhase::Hiding;
        }
    }

    fn remove_notification(&self, id: NotificationId) {
        self.state.lock().notifications.retain(|(n, _)| n.id != id);
    }

    fn set_online_count(&self, count: u64) {
        self.state.lock().online_count = count.to_string();
    }

    fn alert(&self, text: &str) {
        self.state.lock().alerts.push(text.to_string());
    }
}
