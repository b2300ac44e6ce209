//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use chrono::Duration;
use serde::Deserialize;

/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 366;

/// Configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("TOKEN_TTL_HOURS must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {0}")]
    InvalidTokenTtl(i64),
}

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `TOKEN_SECRET` (required): key used to sign bearer tokens
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `TOKEN_TTL_HOURS` (optional): bearer token lifetime, defaults to 24
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    pub token_secret: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_token_ttl_hours() -> i64 {
    24
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL)
    /// - Environment variable values cannot be parsed into expected types
    /// - `TOKEN_TTL_HOURS` is out of range
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        // database_url -> DATABASE_URL, token_ttl_hours -> TOKEN_TTL_HOURS
        let config = envy::from_env::<Config>()?;
        config.token_ttl()?;
        Ok(config)
    }

    /// Bearer token lifetime.
    pub fn token_ttl(&self) -> Result<Duration, ConfigError> {
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.token_ttl_hours) {
            return Err(ConfigError::InvalidTokenTtl(self.token_ttl_hours));
        }
        Duration::try_hours(self.token_ttl_hours)
            .ok_or(ConfigError::InvalidTokenTtl(self.token_ttl_hours))
    }
}
