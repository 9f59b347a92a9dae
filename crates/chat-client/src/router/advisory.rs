//! User-facing advisory texts

use std::time::Duration;

/// Shown in the feed when the transport reports an error
pub const CONNECTION_ERROR: &str = "Connection error. Reconnecting...";

/// Alert for sends attempted without an open connection
pub const CONNECTION_LOST: &str = "Connection lost. Please wait for the client to reconnect.";

/// Shown in the feed once the reconnect policy gives up
pub const RECONNECT_EXHAUSTED: &str = "Unable to reconnect. Please restart the client.";

/// Alert for posting without an authenticated session
pub const PLEASE_LOGIN: &str = "Please login to send messages";

/// Feed line announcing the next reconnect attempt
#[must_use]
pub fn reconnecting_in(delay: Duration) -> String {
    let millis = delay.as_millis();
    if millis % 1000 == 0 {
        let secs = millis / 1000;
        let unit = if secs == 1 { "second" } else { "seconds" };
        format!("Connection lost. Reconnecting in {secs} {unit}...")
    } else {
        format!("Connection lost. Reconnecting in {:.1} seconds...", delay.as_secs_f64())
    }
}
