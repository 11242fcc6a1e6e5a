use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::Level;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,

    // Logging
    pub log_dir: String,
    pub log_level: Level,

    /// unset: no client-side timeout, the transport default applies
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(None)
    }

    /// `api_url`, when given, wins over `API_URL`.
    pub fn from_env_with(api_url: Option<String>) -> Result<Self> {
        dotenv().ok();

        let api_url = match api_url {
            Some(url) => url,
            None => env::var("API_URL").context("API_URL must be set")?,
        };

        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("REQUEST_TIMEOUT_SECS must be whole seconds, got {raw:?}"))?,
            )),
            Err(_) => None,
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            api_url,
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: log_level
                .parse()
                .with_context(|| format!("LOG_LEVEL is not a tracing level: {log_level:?}"))?,
            request_timeout,
        })
    }
}
