use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::resolver::DEFAULT_ROUTE;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub auth_me_path: String,
    pub api_token: Option<String>,
    pub default_route: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be a valid number")?;

        Ok(Self {
            api_base_url: var("API_BASE_URL")
                .unwrap_or_else(|| "http://localhost:7071".to_string()),
            auth_me_path: var("AUTH_ME_PATH").unwrap_or_else(|| "/.auth/me".to_string()),
            api_token: var("API_TOKEN"),
            default_route: var("DEFAULT_ROUTE").unwrap_or_else(|| DEFAULT_ROUTE.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
