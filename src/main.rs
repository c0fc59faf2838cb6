mod config;
mod error;
mod logging;
mod platform;
mod poller;
mod review;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::{Config, Credentials};
use crate::platform::telegram::TelegramTransport;
use crate::platform::Notifier;
use crate::poller::{Poller, PollerSettings};
use crate::review::ApiClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    logging::init(&config.logging).context("Failed to initialize logging")?;
    info!("Configuration loaded from: {}", config_path.display());

    let credentials = Credentials::from_env().map_err(|e| {
        error!("CRITICAL: {}. Refusing to start.", e);
        e
    })?;

    info!("  Endpoint: {}", config.review_api.endpoint);
    info!("  Retry period: {:?}", config.poll.retry_period());
    info!("  Chat: {}", credentials.telegram_chat_id);

    let now = chrono::Local::now();
    let settings = PollerSettings {
        retry_period: config.poll.retry_period(),
        initial_cursor: config.review_api.from_date.unwrap_or(now.timestamp()),
        report_empty: config.poll.report_empty,
        started_on: now.date_naive(),
    };

    let api = ApiClient::new(&config.review_api, credentials.practicum_token.clone())?;
    let notifier = Notifier::new(
        TelegramTransport::new(&credentials.telegram_token),
        credentials.telegram_chat_id.clone(),
    );

    info!("Homework bot is starting...");
    Poller::new(api, notifier, settings).run().await;

    Ok(())
}
