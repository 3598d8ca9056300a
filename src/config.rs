//! # Configuration Module
//!
//! Reads the bot's settings from the environment. A missing required
//! setting is fatal: `main` refuses to start without a bot token, and the
//! webhook transport refuses to start without a public URL.

use std::env;

pub const DEFAULT_DATABASE_PATH: &str = "notes.db";
pub const DEFAULT_PORT: u16 = 10000;

/// Custom error types for configuration loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set
    MissingVar(&'static str),
    /// PORT is set but is not a valid TCP port number
    InvalidPort(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVar(name) => {
                write!(f, "Required environment variable {name} is not set")
            }
            ConfigError::InvalidPort(raw) => write!(f, "PORT is not a valid port number: {raw}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings for the webhook transport. Present only when WEBHOOK_URL is
/// set; otherwise the bot falls back to long polling.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub public_url: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub database_path: String,
    pub webhook: Option<WebhookConfig>,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// BOT_TOKEN is required. WEBHOOK_URL selects the webhook transport;
    /// PORT (default 10000) applies to the webhook server. DATABASE_URL
    /// defaults to a local `notes.db` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = require_var("BOT_TOKEN")?;

        let database_path =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string());

        let webhook = match env::var("WEBHOOK_URL") {
            Ok(url) if !url.trim().is_empty() => {
                let port = match env::var("PORT") {
                    Ok(raw) => parse_port(&raw)?,
                    Err(_) => DEFAULT_PORT,
                };
                Some(WebhookConfig {
                    public_url: url.trim().trim_end_matches('/').to_string(),
                    port,
                })
            }
            _ => None,
        };

        Ok(Config {
            bot_token,
            database_path,
            webhook,
        })
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort(raw.to_string()))
}
