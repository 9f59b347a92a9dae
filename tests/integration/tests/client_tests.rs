//! Client Integration Tests
//!
//! Drive a real `ChatSession` over WebSocket against an in-process server.
//!
//! Run with: cargo test -p integration-tests --test client_tests

use std::sync::Arc;
use std::time::Duration;

use chat_client::{ActionOutcome, ChatSession, FeedPresenter, Rejection, WsConnector};
use chat_core::Ownership;
use integration_tests::{fixtures::*, wait_until, TestServer, TEST_RECONNECT_DELAY_MS};
use serde_json::json;

async fn start_client(
    server: &TestServer,
    username: Option<&str>,
) -> (ChatSession, Arc<FeedPresenter>) {
    let feed = Arc::new(FeedPresenter::new());
    let chat = ChatSession::start(
        &server.config(username),
        feed.clone(),
        Arc::new(WsConnector::new()),
    );
    (chat, feed)
}

// ============================================================================
// Inbound Routing Tests
// ============================================================================

#[tokio::test]
async fn test_online_count_updates() {
    let mut server = TestServer::start().await.expect("Failed to start server");
    let (chat, feed) = start_client(&server, None).await;
    let mut conn = server.accept().await.unwrap();

    conn.send_text(online_count(7)).await.unwrap();
    assert!(wait_until(|| feed.snapshot().online_count == "7").await);

    conn.send_text(online_count(0)).await.unwrap();
    assert!(wait_until(|| feed.snapshot().online_count == "0").await);

    chat.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_chat_messages_classified_by_author() {
    let mut server = TestServer::start().await.expect("Failed to start server");
    let me = unique_username();
    let (chat, feed) = start_client(&server, Some(&me)).await;
    let mut conn = server.accept().await.unwrap();

    conn.send_text(chat_message("mine", &me)).await.unwrap();
    conn.send_text(chat_message("theirs", "someone-else")).await.unwrap();
    assert!(wait_until(|| feed.snapshot().messages().count() == 2).await);

    let state = feed.snapshot();
    let messages: Vec<_> = state.messages().collect();
    assert_eq!(messages[0].text, "mine");
    assert_eq!(messages[0].ownership, Ownership::Own);
    assert_eq!(messages[1].text, "theirs");
    assert_eq!(messages[1].ownership, Ownership::Other);

    chat.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_presence_and_error_events() {
    let mut server = TestServer::start().await.expect("Failed to start server");
    let (chat, feed) = start_client(&server, None).await;
    let mut conn = server.accept().await.unwrap();

    conn.send_text(user_join("bob")).await.unwrap();
    conn.send_text(user_leave("bob")).await.unwrap();
    conn.send_text(server_error("Message too long")).await.unwrap();
    assert!(wait_until(|| !feed.snapshot().alerts.is_empty()).await);

    let state = feed.snapshot();
    assert_eq!(
        state.system_lines().collect::<Vec<_>>(),
        vec!["bob joined the chat", "bob left the chat"]
    );
    assert_eq!(state.alerts, vec!["Message too long".to_string()]);
    assert!(chat.is_ready());

    chat.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_bad_frames_do_not_close_connection() {
    let mut server = TestServer::start().await.expect("Failed to start server");
    let (chat, feed) = start_client(&server, None).await;
    let mut conn = server.accept().await.unwrap();

    conn.send_text("{not json").await.unwrap();
    conn.send_text(r#"{"type":"chat_message"}"#).await.unwrap();
    conn.send_binary(vec![1, 2, 3]).await.unwrap();
    conn.send_text(unknown_event()).await.unwrap();
    conn.send_text(online_count(3)).await.unwrap();

    assert!(wait_until(|| feed.snapshot().online_count == "3").await);
    let state = feed.snapshot();
    assert!(state.entries.is_empty());
    assert!(state.alerts.is_empty());
    assert!(chat.is_ready());
    assert!(server.expect_no_connection(Duration::from_millis(300)).await);

    chat.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_push_notification_shown() {
    let mut server = TestServer::start().await.expect("Failed to start server");
    let (chat, feed) = start_client(&server, None).await;
    let mut conn = server.accept().await.unwrap();

    conn.send_text(push_notification("deploy finished", "ci")).await.unwrap();
    assert!(wait_until(|| !feed.snapshot().notifications.is_empty()).await);

    let state = feed.snapshot();
    let (notification, _) = &state.notifications[0];
    assert_eq!(notification.sender, "ci");
    assert_eq!(notification.text, "deploy finished");
    assert_eq!(chat.router().notifications().pending(), 1);

    chat.shutdown().await.unwrap();
}

// ============================================================================
// Outbound Action Tests
// ============================================================================

#[tokio::test]
async fn test_chat_message_reaches_server() {
    let mut server = TestServer::start().await.expect("Failed to start server");
    let me = unique_username();
    let (chat, _feed) = start_client(&server, Some(&me)).await;
    let mut conn = server.accept().await.unwrap();
    assert!(wait_until(|| chat.is_ready()).await);

    let mut input = String::from("  hello everyone  ");
    assert_eq!(chat.send_chat_message(&mut input), ActionOutcome::Sent);
    assert!(input.is_empty());

    let frame = conn.recv_json().await.unwrap();
    assert_eq!(frame, json!({ "type": "chat_message", "message": "hello everyone" }));

    chat.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_notification_reaches_server() {
    let mut server = TestServer::start().await.expect("Failed to start server");
    let (chat, _feed) = start_client(&server, None).await;
    let mut conn = server.accept().await.unwrap();
    assert!(wait_until(|| chat.is_ready()).await);

    let mut prompt = |_: &str| Some("coffee?".to_string());
    assert_eq!(chat.send_notification(&mut prompt), ActionOutcome::Sent);

    let frame = conn.recv_json().await.unwrap();
    assert_eq!(frame, json!({ "type": "push_notification", "text": "coffee?" }));

    chat.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unauthenticated_send_transmits_nothing() {
    let mut server = TestServer::start().await.expect("Failed to start server");
    let (chat, feed) = start_client(&server, None).await;
    let mut conn = server.accept().await.unwrap();
    assert!(wait_until(|| chat.is_ready()).await);

    let mut input = String::from("hello");
    assert_eq!(
        chat.send_chat_message(&mut input),
        ActionOutcome::Rejected(Rejection::NotAuthenticated)
    );
    assert_eq!(input, "hello");
    assert_eq!(feed.snapshot().alerts, vec!["Please login to send messages".to_string()]);
    assert!(conn.expect_silence(Duration::from_millis(300)).await);

    chat.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_blank_message_transmits_nothing() {
    let mut server = TestServer::start().await.expect("Failed to start server");
    let me = unique_username();
    let (chat, _feed) = start_client(&server, Some(&me)).await;
    let mut conn = server.accept().await.unwrap();
    assert!(wait_until(|| chat.is_ready()).await);

    let mut input = String::from(" \t ");
    assert_eq!(chat.send_chat_message(&mut input), ActionOutcome::Discarded);
    assert_eq!(input, " \t ");
    assert!(conn.expect_silence(Duration::from_millis(300)).await);

    chat.shutdown().await.unwrap();
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_server_close_triggers_single_reconnect() {
    let mut server = TestServer::start().await.expect("Failed to start server");
    let me = unique_username();
    let (chat, feed) = start_client(&server, Some(&me)).await;
    let conn = server.accept().await.unwrap();
    assert!(wait_until(|| chat.is_ready()).await);

    conn.close().await.unwrap();
    assert!(wait_until(|| !chat.is_ready()).await);

    // Sends during the outage are rejected
    let mut input = String::from("anyone?");
    assert_eq!(
        chat.send_chat_message(&mut input),
        ActionOutcome::Rejected(Rejection::NotConnected)
    );
    assert_eq!(input, "anyone?");

    let mut conn = server.accept().await.unwrap();
    assert!(wait_until(|| chat.is_ready()).await);
    assert!(
        server
            .expect_no_connection(Duration::from_millis(TEST_RECONNECT_DELAY_MS * 3))
            .await
    );

    let state = feed.snapshot();
    assert_eq!(
        state.system_lines().collect::<Vec<_>>(),
        vec!["Connection lost. Reconnecting in 0.5 seconds..."]
    );
    assert_eq!(
        state.alerts,
        vec!["Connection lost. Please wait for the client to reconnect.".to_string()]
    );

    // The new connection carries traffic
    let mut input = String::from("back");
    assert_eq!(chat.send_chat_message(&mut input), ActionOutcome::Sent);
    let frame = conn.recv_json().await.unwrap();
    assert_eq!(frame["message"], "back");

    chat.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_server_close_is_acknowledged() {
    let mut server = TestServer::start().await.expect("Failed to start server");
    let (chat, _feed) = start_client(&server, None).await;
    let conn = server.accept().await.unwrap();
    assert!(wait_until(|| chat.is_ready()).await);

    assert!(conn.close_expecting_reply().await.unwrap());
    assert!(wait_until(|| !chat.is_ready()).await);

    chat.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_closes_socket() {
    let mut server = TestServer::start().await.expect("Failed to start server");
    let (chat, _feed) = start_client(&server, None).await;
    let mut conn = server.accept().await.unwrap();
    assert!(wait_until(|| chat.is_ready()).await);

    chat.shutdown().await.unwrap();

    assert_eq!(conn.recv_text().await.unwrap(), None);
    assert!(server.expect_no_connection(Duration::from_millis(500)).await);
}
