//! Line-oriented terminal presenter

use super::{Notification, NotificationId, Presenter};
use chat_core::ChatMessage;
use parking_lot::Mutex;
use std::io::{self, Write};

/// Writes the feed as plain text lines
pub struct TerminalPresenter {
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalPresenter {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Presenter on the process stdout
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Print a prompt label without a trailing newline
    pub fn prompt_label(&self, label: &str) {
        let mut out = self.out.lock();
        if let Err(e) = write!(out, "{label} ").and_then(|()| out.flush()) {
            tracing::debug!(error = %e, "Failed to write to terminal");
        }
    }

    fn line(&self, text: &str) {
        let mut out = self.out.lock();
        if let Err(e) = writeln!(out, "{text}").and_then(|()| out.flush()) {
            tracing::debug!(error = %e, "Failed to write to terminal");
        }
    }
}

impl Presenter for TerminalPresenter {
    fn render_message(&self, message: &ChatMessage) {
        let author = if message.is_own() {
            "you"
        } else {
            message.username.as_str()
        };
        self.line(&format!("[{author}] {}", message.text));
    }

    fn render_system(&self, text: &str) {
        self.line(&format!("* {text}"));
    }

    fn show_notification(&self, notification: &Notification) {
        self.line(&format!("{}: {}", notification.title(), notification.text));
    }

    fn dismiss_notification(&self, id: NotificationId) {
        tracing::trace!(id, "Notification hiding");
    }

    fn remove_notification(&self, id: NotificationId) {
        tracing::trace!(id, "Notification removed");
    }

    fn set_online_count(&self, count: u64) {
        self.line(&format!("* Online: {count}"));
    }

    fn alert(&self, text: &str) {
        self.line(&format!("! {text}"));
    }
}

impl std::fmt::Debug for TerminalPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalPresenter").finish_non_exhaustive()
    }
}
