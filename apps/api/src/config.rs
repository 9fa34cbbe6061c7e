use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::retry::{DEFAULT_INITIAL_DELAY, DEFAULT_MAX_ATTEMPTS};
use crate::llm_client::{DEFAULT_GEMINI_API_URL, DEFAULT_HTTP_TIMEOUT};

/// Application configuration loaded from environment variables.
///
/// Deliberately not `Debug`: it holds the provider API key.
#[derive(Clone)]
pub struct Config {
    /// May be empty; the provider rejects it at call time.
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub http_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let max_attempts = parse_or(&lookup, "GENERATION_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?;
        if max_attempts == 0 {
            bail!("GENERATION_MAX_ATTEMPTS must be at least 1");
        }

        let default_delay_ms = DEFAULT_INITIAL_DELAY.as_millis() as u64;
        let default_timeout_secs = DEFAULT_HTTP_TIMEOUT.as_secs();

        Ok(Config {
            gemini_api_key: lookup("GEMINI_API_KEY").unwrap_or_default(),
            gemini_api_url: lookup("GEMINI_API_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string()),
            max_attempts,
            initial_delay: Duration::from_millis(parse_or(
                &lookup,
                "GENERATION_INITIAL_DELAY_MS",
                default_delay_ms,
            )?),
            http_timeout: Duration::from_secs(parse_or(
                &lookup,
                "GENERATION_HTTP_TIMEOUT_SECS",
                default_timeout_secs,
            )?),
            port: parse_or(&lookup, "PORT", 8080u16)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        None => Ok(default),
    }
}
