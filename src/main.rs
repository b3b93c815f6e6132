mod config;
mod error;
mod homework;
mod logging;
mod messenger;
mod poller;
mod practicum;

use std::path::PathBuf;

use anyhow::{Context, Result};
use teloxide::Bot;
use tracing::{error, info};

use crate::config::{Config, Credentials, Settings};
use crate::error::ConfigError;
use crate::messenger::TelegramMessenger;
use crate::poller::Poller;
use crate::practicum::PracticumClient;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    let settings = Settings::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    // Initialize logging
    let _log_guard = logging::init(&settings.logging)?;

    let credentials = Credentials::from_env();
    if !credentials.is_ready() {
        let missing = credentials.missing();
        error!(?missing, "Required environment variables are missing, exiting");
        return Err(ConfigError::MissingCredentials(missing).into());
    }

    let config = Config {
        credentials,
        settings,
    };

    info!("Configuration loaded from: {}", config_path.display());
    info!("  Endpoint: {}", config.settings.poll.endpoint);
    info!("  Retry period: {}s", config.settings.poll.retry_period_secs);
    info!("  Cursor policy: {}", config.settings.poll.cursor_policy);
    info!("  Chat: {}", config.credentials.telegram_chat_id);

    let mut http = reqwest::Client::builder();
    if let Some(timeout) = config.settings.poll.request_timeout() {
        http = http.timeout(timeout);
    }
    let http = http.build().context("Failed to build HTTP client")?;

    let source = PracticumClient::new(
        http,
        config.settings.poll.endpoint.clone(),
        config.credentials.practicum_token.clone(),
    );
    let messenger = TelegramMessenger::new(Bot::new(&config.credentials.telegram_token));

    let cursor = chrono::Utc::now().timestamp();
    info!(endpoint = source.endpoint(), "Bot is starting...");

    Poller::new(
        source,
        messenger,
        config.credentials.telegram_chat_id.clone(),
        &config.settings.poll,
        cursor,
    )
    .run()
    .await;

    Ok(())
}
