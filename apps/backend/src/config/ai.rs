//! Petition reviewer endpoint settings.

use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_AI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl ReviewerConfig {
    /// `None` when no API key is configured; petitions are then unavailable.
    pub fn from_env() -> Result<Option<Self>, AppError> {
        let api_key = match env::var("POLIS_AI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => return Ok(None),
        };

        Ok(Some(Self {
            endpoint: env::var("POLIS_AI_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_AI_ENDPOINT.to_string()),
            model: env::var("POLIS_AI_MODEL").unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string()),
            api_key,
            timeout: timeout_from_env("POLIS_AI_TIMEOUT_SECS", DEFAULT_AI_TIMEOUT_SECS)?,
        }))
    }
}

/// Seconds from `var`, or `default` when unset.
pub(crate) fn timeout_from_env(var: &str, default: u64) -> Result<Duration, AppError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                AppError::config(format!("{var} must be a positive number of seconds, got '{raw}'"))
            }),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}
