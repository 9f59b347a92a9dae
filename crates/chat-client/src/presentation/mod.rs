//! Presentation seams
//!
//! The router and session only talk to the user through these traits.

mod feed;
mod terminal;

pub use feed::{FeedEntry, FeedPresenter, FeedState, NotificationPhase};
pub use terminal::TerminalPresenter;

use chat_core::ChatMessage;

/// Identifier of a displayed notification
pub type NotificationId = u64;

/// A push notification on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub sender: String,
    pub text: String,
}

impl Notification {
    /// Banner title shown above the text
    #[must_use]
    pub fn title(&self) -> String {
        format!("🔔 {}", self.sender)
    }
}

/// Renders UI-observable state
///
/// Called from the dispatch loop and from notification timers, so
/// implementations must be cheap and must not block.
pub trait Presenter: Send + Sync {
    /// Append a chat message to the feed
    fn render_message(&self, message: &ChatMessage);

    /// Append a system line to the feed
    fn render_system(&self, text: &str);

    fn show_notification(&self, notification: &Notification);

    /// Start the exit transition of a notification
    fn dismiss_notification(&self, id: NotificationId);

    /// Remove a notification entirely
    fn remove_notification(&self, id: NotificationId);

    fn set_online_count(&self, count: u64);

    /// Blocking alert
    fn alert(&self, text: &str);
}

/// The message composer
pub trait InputField {
    /// Current raw contents
    fn text(&self) -> &str;

    fn clear(&mut self);
}

impl InputField for String {
    fn text(&self) -> &str {
        self.as_str()
    }

    fn clear(&mut self) {
        String::clear(self);
    }
}

/// Asks the user for free text; `None` means cancelled
pub trait TextPrompt {
    fn prompt(&mut self, label: &str) -> Option<String>;
}

impl<F> TextPrompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn prompt(&mut self, label: &str) -> Option<String> {
        self(label)
    }
}
