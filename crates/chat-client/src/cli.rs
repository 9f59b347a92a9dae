//! Terminal front-end
//!
//! Reads commands from stdin and renders the feed to stdout.

use crate::chat::{ChatSession, NOTIFICATION_PROMPT};
use crate::connection::WsConnector;
use crate::presentation::{Presenter, TerminalPresenter};
use chat_common::{AppResult, ClientConfig};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: post it as a chat message (`//text` sends `/text`)
    Say(String),
    /// `/notify [text]`; prompts when no text is given
    Notify(Option<String>),
    /// `/quit`
    Quit,
    /// Any other `/command`
    Unknown(String),
    /// Blank line
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Self::Empty;
        }

        let Some(rest) = line.trim_start().strip_prefix('/') else {
            return Self::Say(line.to_string());
        };
        if rest.starts_with('/') {
            return Self::Say(rest.to_string());
        }

        let (name, args) = rest.split_once(' ').unwrap_or((rest, ""));
        match name {
            "notify" => {
                let text = args.trim_start();
                Self::Notify((!text.is_empty()).then(|| text.to_string()))
            }
            "quit" | "exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Run the interactive client until `/quit`, end of input, Ctrl-C, or the
/// connection giving up
pub async fn run(config: ClientConfig) -> AppResult<()> {
    tracing::info!(
        app = %config.app.name,
        url = %config.server.url(),
        "Starting terminal client"
    );

    let terminal = Arc::new(TerminalPresenter::stdout());
    let chat = ChatSession::start(&config, terminal.clone(), Arc::new(WsConnector::new()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            () = chat.closed() => break,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        };

        // End of input
        let Some(line) = line else { break };

        match Command::parse(&line) {
            Command::Empty => {}
            Command::Say(text) => {
                let mut input = text;
                chat.send_chat_message(&mut input);
            }
            Command::Notify(Some(text)) => {
                let mut text = Some(text);
                chat.send_notification(&mut |_: &str| text.take());
            }
            Command::Notify(None) => {
                if chat.is_ready() {
                    terminal.prompt_label(NOTIFICATION_PROMPT);
                    let mut text = lines.next_line().await?;
                    chat.send_notification(&mut |_: &str| text.take());
                } else {
                    // Reports the rejection without prompting
                    chat.send_notification(&mut |_: &str| -> Option<String> { None });
                }
            }
            Command::Quit => break,
            Command::Unknown(name) => {
                terminal.alert(&format!("Unknown command: /{name}"));
            }
        }
    }

    chat.shutdown().await?;
    Ok(())
}
