use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::BotError;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_review_api_config")]
    pub review_api: ReviewApiConfig,
    #[serde(default = "default_poll_config")]
    pub poll: PollConfig,
    #[serde(default = "default_logging_config")]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReviewApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Cursor for the first request. Falls back to the process start time.
    #[serde(default)]
    pub from_date: Option<i64>,
}

impl ReviewApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollConfig {
    #[serde(default = "default_retry_period_secs")]
    pub retry_period_secs: u64,
    /// Send a "nothing new" report when the API returns no homeworks.
    #[serde(default = "default_report_empty")]
    pub report_empty: bool,
}

impl PollConfig {
    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
    #[serde(default = "default_log_max_bytes")]
    pub max_bytes: u64,
    #[serde(default = "default_log_backups")]
    pub backups: usize,
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_retry_period_secs() -> u64 {
    600
}

fn default_report_empty() -> bool {
    true
}

fn default_log_file() -> PathBuf {
    PathBuf::from("homework_bot.log")
}

fn default_log_max_bytes() -> u64 {
    50_000_000
}

fn default_log_backups() -> usize {
    5
}

fn default_review_api_config() -> ReviewApiConfig {
    ReviewApiConfig {
        endpoint: default_endpoint(),
        request_timeout_secs: default_request_timeout_secs(),
        from_date: None,
    }
}

fn default_poll_config() -> PollConfig {
    PollConfig {
        retry_period_secs: default_retry_period_secs(),
        report_empty: default_report_empty(),
    }
}

fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        file: default_log_file(),
        max_bytes: default_log_max_bytes(),
        backups: default_log_backups(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            review_api: default_review_api_config(),
            poll: default_poll_config(),
            logging: default_logging_config(),
        }
    }
}

impl Config {
    /// Load settings from a TOML file. A missing file means all defaults;
    /// a file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.review_api.endpoint.trim().is_empty() {
            anyhow::bail!("review_api.endpoint must not be empty");
        }
        if config.poll.retry_period_secs == 0 {
            anyhow::bail!("poll.retry_period_secs must be at least 1");
        }
        Ok(config)
    }
}

/// Secrets needed to talk to the review API and to Telegram.
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"***")
            .field("telegram_token", &"***")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from any variable source. Unset, empty and
    /// whitespace-only values are all reported as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut fetch = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let practicum_token = fetch(PRACTICUM_TOKEN_VAR);
        let telegram_token = fetch(TELEGRAM_TOKEN_VAR);
        let telegram_chat_id = fetch(TELEGRAM_CHAT_ID_VAR);

        if !missing.is_empty() {
            return Err(BotError::Configuration { missing });
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
        })
    }
}
