//! services/dispatcher/src/config.rs
//!
//! Defines the dispatcher's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables, fresh on every
//! invocation. The `.env` file is used for local development.

use chrono::{FixedOffset, Offset, Utc};
use std::fmt;
use tracing::Level;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_DATABASE: &str = "learning";
pub const DEFAULT_COLLECTION: &str = "daily_learnings";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration for one invocation.
#[derive(Clone)]
pub struct Config {
    pub sender_email: String,
    pub sender_password: String,
    /// Passed through to the mail relay as-is; may hold several comma-separated addresses.
    pub recipients: String,
    pub mongodb_uri: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub database_name: String,
    pub collection_name: String,
    /// Offset whose calendar date counts as "today".
    pub utc_offset: FixedOffset,
    pub log_level: Level,
}

// The credential and the connection string (which usually embeds a password)
// must never reach the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("sender_email", &self.sender_email)
            .field("sender_password", &"<REDACTED>")
            .field("recipients", &self.recipients)
            .field("mongodb_uri", &"<REDACTED>")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("database_name", &self.database_name)
            .field("collection_name", &self.collection_name)
            .field("utc_offset", &self.utc_offset)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// The four required values (`MY_EMAIL`, `MY_PASSWORD`, `TO_ADDRS`,
    /// `MONGODB_CONNECTION_STRING`) are checked before anything else is parsed.
    /// The `.env` file is skipped in test builds to keep tests hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Required Secrets ---
        let sender_email = required("MY_EMAIL")?;
        let sender_password = required("MY_PASSWORD")?;
        let recipients = required("TO_ADDRS")?;
        let mongodb_uri = required("MONGODB_CONNECTION_STRING")?;

        // --- Mail Relay ---
        let smtp_host =
            std::env::var("SMTP_HOST").unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string());
        let smtp_port = match std::env::var("SMTP_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| {
                ConfigError::InvalidValue("SMTP_PORT".to_string(), e.to_string())
            })?,
            Err(_) => DEFAULT_SMTP_PORT,
        };

        // --- Document Store ---
        let database_name =
            std::env::var("MONGODB_DATABASE").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());
        let collection_name = std::env::var("MONGODB_COLLECTION")
            .unwrap_or_else(|_| DEFAULT_COLLECTION.to_string());

        let utc_offset = match std::env::var("LEARNING_UTC_OFFSET") {
            Ok(raw) => raw.parse::<FixedOffset>().map_err(|_| {
                ConfigError::InvalidValue(
                    "LEARNING_UTC_OFFSET".to_string(),
                    format!("'{}' is not an offset like +05:30", raw),
                )
            })?,
            Err(_) => Utc.fix(),
        };

        let log_level = log_level_from_env()?;

        Ok(Self {
            sender_email,
            sender_password,
            recipients,
            mongodb_uri,
            smtp_host,
            smtp_port,
            database_name,
            collection_name,
            utc_offset,
            log_level,
        })
    }
}

/// Reads `RUST_LOG` as a single level, defaulting to `INFO`.
///
/// Kept separate from `Config::from_env` so logging can be set up once per
/// process, before any invocation has loaded its secrets.
pub fn log_level_from_env() -> Result<Level, ConfigError> {
    let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
    log_level_str.parse::<Level>().map_err(|_| {
        ConfigError::InvalidValue(
            "RUST_LOG".to_string(),
            format!("'{}' is not a valid log level", log_level_str),
        )
    })
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}
