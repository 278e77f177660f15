use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_PORT: &str = "8080";
const DEFAULT_SUBMIT_TIMEOUT_SECS: &str = "15";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Unset means drafts live in process memory.
    pub redis_url: Option<String>,
    pub submit_base_url: String,
    pub submit_api_key: String,
    pub submit_timeout: Duration,
    pub port: u16,
    /// Externally reachable origin of this service; share QR codes point here.
    pub public_base_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let timeout_secs = lookup("SUBMIT_TIMEOUT_SECS")
            .unwrap_or_else(|| DEFAULT_SUBMIT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .context("SUBMIT_TIMEOUT_SECS must be a whole number of seconds")?;

        let port = lookup("PORT")
            .unwrap_or_else(|| DEFAULT_PORT.to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            redis_url: lookup("REDIS_URL").filter(|url| !url.trim().is_empty()),
            submit_base_url: require("SUBMIT_BASE_URL")?,
            submit_api_key: require("SUBMIT_API_KEY")?,
            submit_timeout: Duration::from_secs(timeout_secs),
            port,
            public_base_url: lookup("PUBLIC_BASE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| format!("http://localhost:{port}")),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
