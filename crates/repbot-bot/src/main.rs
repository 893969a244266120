//! repbot entry point
//!
//! Run with:
//! ```bash
//! cargo run -p repbot-bot
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use repbot_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration before tracing so the log format can follow APP_ENV
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, code = e.error_code(), "Bot stopped");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), repbot_common::AppError> {
    info!(
        app = %config.app.name,
        env = ?config.app.env,
        scope = ?config.discord.command_scope,
        denial = ?config.policy.denial,
        owner_only_admin = config.policy.owner_only_admin,
        "Configuration loaded"
    );

    repbot_bot::run(config).await
}
