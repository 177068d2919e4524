//! Flavor image pipeline settings.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::ai::timeout_from_env;
use crate::error::AppError;

pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagingConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub output_dir: PathBuf,
    pub public_base_url: String,
}

impl ImagingConfig {
    /// `None` when no generator endpoint is configured.
    pub fn from_env() -> Result<Option<Self>, AppError> {
        let endpoint = match env::var("POLIS_IMAGE_ENDPOINT") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => return Ok(None),
        };

        let output_dir = env::var("POLIS_IMAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./flavor-images"));
        let public_base_url = env::var("POLIS_IMAGE_BASE_URL")
            .unwrap_or_else(|_| "/flavor-images".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Some(Self {
            endpoint,
            api_key: env::var("POLIS_IMAGE_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            timeout: timeout_from_env("POLIS_IMAGE_TIMEOUT_SECS", DEFAULT_IMAGE_TIMEOUT_SECS)?,
            output_dir,
            public_base_url,
        }))
    }
}
