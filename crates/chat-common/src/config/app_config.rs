//! Client configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub identity: IdentityConfig,
    pub reconnect: ReconnectConfig,
    pub notification: NotificationConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Chat server endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host and optional port, e.g. `chat.example.com` or `127.0.0.1:8000`
    pub host: String,
    /// Use `wss://` instead of `ws://`
    #[serde(default)]
    pub secure: bool,
    #[serde(default = "default_path")]
    pub path: String,
}

impl ServerConfig {
    /// WebSocket URL of the chat channel
    #[must_use]
    pub fn url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        format!("{scheme}://{}{path}", self.host.trim_end_matches('/'))
    }
}

/// Identity of the local user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityConfig {
    /// Username; the session is anonymous when unset
    #[serde(default)]
    pub username: Option<String>,
}

/// Reconnection policy settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReconnectConfig {
    #[serde(default = "default_reconnect_delay")]
    pub delay_ms: u64,
    #[serde(default = "default_reconnect_delay")]
    pub max_delay_ms: u64,
    #[serde(default = "default_reconnect_multiplier")]
    pub multiplier: u32,
    /// Unbounded when `None`
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_reconnect_delay(),
            max_delay_ms: default_reconnect_delay(),
            multiplier: default_reconnect_multiplier(),
            max_attempts: None,
        }
    }
}

/// Push notification display timings
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_notification_visible")]
    pub visible_ms: u64,
    #[serde(default = "default_notification_exit")]
    pub exit_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            visible_ms: default_notification_visible(),
            exit_ms: default_notification_exit(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "chat-client".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_path() -> String {
    "/ws/chat/".to_string()
}

fn default_reconnect_delay() -> u64 {
    3000
}

fn default_reconnect_multiplier() -> u32 {
    1
}

fn default_notification_visible() -> u64 {
    5000
}

fn default_notification_exit() -> u64 {
    300
}

/// Read and parse an optional variable, failing on unparsable values
fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(None),
    }
}

fn parse_bool(name: &'static str) -> Result<Option<bool>, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidValue(name, raw)),
        },
        Err(_) => Ok(None),
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if `CHAT_HOST` is missing or a variable has an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let env_name = env::var("APP_ENV").ok();
        let env_kind = match env_name.as_deref() {
            Some(raw) => Environment::parse(raw)
                .ok_or_else(|| ConfigError::InvalidValue("APP_ENV", raw.to_string()))?,
            None => default_env(),
        };

        let delay_ms = parse_var("RECONNECT_DELAY_MS")?.unwrap_or_else(default_reconnect_delay);

        let config = Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env_kind,
            },
            server: ServerConfig {
                host: env::var("CHAT_HOST")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .ok_or(ConfigError::MissingVar("CHAT_HOST"))?,
                secure: parse_bool("CHAT_SECURE")?.unwrap_or(false),
                path: env::var("CHAT_PATH").unwrap_or_else(|_| default_path()),
            },
            identity: IdentityConfig {
                username: env::var("CHAT_USERNAME").ok(),
            },
            reconnect: ReconnectConfig {
                delay_ms,
                max_delay_ms: parse_var("RECONNECT_MAX_DELAY_MS")?.unwrap_or(delay_ms),
                multiplier: parse_var("RECONNECT_MULTIPLIER")?
                    .unwrap_or_else(default_reconnect_multiplier),
                max_attempts: parse_var("RECONNECT_MAX_ATTEMPTS")?,
            },
            notification: NotificationConfig {
                visible_ms: parse_var("NOTIFICATION_VISIBLE_MS")?
                    .unwrap_or_else(default_notification_visible),
                exit_ms: parse_var("NOTIFICATION_EXIT_MS")?
                    .unwrap_or_else(default_notification_exit),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] when a constraint does not hold
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reconnect.multiplier == 0 {
            return Err(ConfigError::InvalidValue(
                "RECONNECT_MULTIPLIER",
                "must be at least 1".to_string(),
            ));
        }
        if self.reconnect.max_delay_ms < self.reconnect.delay_ms {
            return Err(ConfigError::InvalidValue(
                "RECONNECT_MAX_DELAY_MS",
                format!("must be >= RECONNECT_DELAY_MS ({})", self.reconnect.delay_ms),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
