//! Test fixtures and frame builders
//!
//! Server-to-client frames as the chat server emits them.

use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A username no other test uses
pub fn unique_username() -> String {
    format!("testuser{}", unique_suffix())
}

pub fn online_count(count: u64) -> String {
    json!({ "type": "online_count", "count": count }).to_string()
}

pub fn chat_message(message: &str, username: &str) -> String {
    json!({ "type": "chat_message", "message": message, "username": username }).to_string()
}

pub fn push_notification(text: &str, sender: &str) -> String {
    json!({ "type": "push_notification", "text": text, "sender": sender }).to_string()
}

pub fn user_join(username: &str) -> String {
    json!({ "type": "user_join", "username": username }).to_string()
}

pub fn user_leave(username: &str) -> String {
    json!({ "type": "user_leave", "username": username }).to_string()
}

pub fn server_error(message: &str) -> String {
    json!({ "type": "error", "message": message }).to_string()
}

/// A frame with a tag the client does not know
pub fn unknown_event() -> String {
    json!({ "type": "typing_indicator", "username": "someone" }).to_string()
}
