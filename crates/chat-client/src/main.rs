//! Terminal chat client entry point
//!
//! Run with:
//! ```bash
//! CHAT_HOST=127.0.0.1:8000 CHAT_USERNAME=alice cargo run -p chat-client
//! ```
//!
//! Configuration is loaded from environment variables.

use chat_common::{try_init_tracing_with_config, AppError, ClientConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(AppError::from(e).exit_code());
        }
    };

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        host = %config.server.host,
        secure = config.server.secure,
        "Configuration loaded"
    );

    // Run the client
    if let Err(e) = chat_client::cli::run(config).await {
        error!(
            error = %e,
            code = e.error_code(),
            startup = e.is_startup_error(),
            "Chat client stopped"
        );
        eprintln!("{e}");
        std::process::exit(e.exit_code());
    }
}
