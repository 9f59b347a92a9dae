//! Push notification timers
//!
//! Each shown notification owns one task that starts its exit transition and
//! then removes it. Tasks are aborted when the center is cancelled or dropped.

use crate::presentation::{Notification, NotificationId, Presenter};
use chat_common::NotificationConfig;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long a notification stays up and how long its exit transition runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    pub visible: Duration,
    pub exit: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            visible: Duration::from_millis(5000),
            exit: Duration::from_millis(300),
        }
    }
}

impl From<&NotificationConfig> for NotificationTiming {
    fn from(config: &NotificationConfig) -> Self {
        Self {
            visible: Duration::from_millis(config.visible_ms),
            exit: Duration::from_millis(config.exit_ms),
        }
    }
}

type Timers = Mutex<HashMap<NotificationId, JoinHandle<()>>>;

/// Shows notifications and schedules their removal
pub struct NotificationCenter {
    presenter: Arc<dyn Presenter>,
    timing: NotificationTiming,
    next_id: AtomicU64,
    timers: Arc<Timers>,
}

impl NotificationCenter {
    pub fn new(presenter: Arc<dyn Presenter>, timing: NotificationTiming) -> Self {
        Self {
            presenter,
            timing,
            next_id: AtomicU64::new(1),
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Display a notification and start its dismissal timer.
    ///
    /// Must be called within a tokio runtime.
    pub fn show(&self, sender: &str, text: &str) -> NotificationId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification {
            id,
            sender: sender.to_string(),
            text: text.to_string(),
        };

        self.presenter.show_notification(&notification);
        tracing::debug!(id, sender = %sender, "Notification shown");

        let presenter = self.presenter.clone();
        let timers: Weak<Timers> = Arc::downgrade(&self.timers);
        let NotificationTiming { visible, exit } = self.timing;

        // Hold the lock across spawn so the task cannot finish before it is registered
        let mut pending = self.timers.lock();
        let task = tokio::spawn(async move {
            tokio::time::sleep(visible).await;
            presenter.dismiss_notification(id);

            tokio::time::sleep(exit).await;
            presenter.remove_notification(id);

            if let Some(timers) = timers.upgrade() {
                timers.lock().remove(&id);
            }
        });
        pending.insert(id, task);

        id
    }

    /// Number of notifications still on screen
    pub fn pending(&self) -> usize {
        self.timers.lock().len()
    }

    /// Abort every pending timer; notifications stay as they are
    pub fn cancel_all(&self) {
        let timers: Vec<_> = self.timers.lock().drain().collect();
        if !timers.is_empty() {
            tracing::debug!(count = timers.len(), "Cancelling notification timers");
        }
        for (_, task) in timers {
            task.abort();
        }
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("timing", &self.timing)
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}
