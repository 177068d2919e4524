use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::prompt::city_prompt;
use super::ImagingError;
use crate::config::imaging::ImagingConfig;
use crate::domain::{CityState, MasterPolicy};

pub const IMAGE_WIDTH: u32 = 1024;
pub const IMAGE_HEIGHT: u32 = 768;

/// Renders the city as image bytes (PNG).
#[async_trait]
pub trait FlavorImageGenerator: Send + Sync {
    async fn generate(
        &self,
        city: &CityState,
        passed: &[MasterPolicy],
    ) -> Result<Vec<u8>, ImagingError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    width: u32,
    height: u32,
    num_inference_steps: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    /// Base64-encoded PNG
    image: String,
}

/// Posts `{prompt, width, height}` to a text-to-image endpoint.
pub struct HttpImageGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpImageGenerator {
    pub fn new(config: &ImagingConfig) -> Result<Self, ImagingError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ImagingError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

fn request_error(e: reqwest::Error) -> ImagingError {
    if e.is_timeout() {
        ImagingError::Timeout
    } else {
        ImagingError::Transport(e.to_string())
    }
}

/// Decode the base64 payload, tolerating a `data:` URL prefix.
pub fn decode_image(payload: &str) -> Result<Vec<u8>, ImagingError> {
    let raw = payload
        .split_once(";base64,")
        .map(|(_, data)| data)
        .unwrap_or(payload);
    STANDARD
        .decode(raw.trim())
        .map_err(|e| ImagingError::Malformed(e.to_string()))
}

#[async_trait]
impl FlavorImageGenerator for HttpImageGenerator {
    async fn generate(
        &self,
        city: &CityState,
        passed: &[MasterPolicy],
    ) -> Result<Vec<u8>, ImagingError> {
        let prompt = city_prompt(city, passed);
        let mut request = self.client.post(&self.endpoint).json(&GenerateRequest {
            prompt: &prompt,
            width: IMAGE_WIDTH,
            height: IMAGE_HEIGHT,
            num_inference_steps: 4,
        });
        if let Some(key) = &self.api_key {
            request = request.header("X-API-Key", key);
        }

        let response = request.send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImagingError::Transport(format!(
                "generator returned HTTP {status}"
            )));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ImagingError::Timeout
            } else {
                ImagingError::Malformed(e.to_string())
            }
        })?;
        decode_image(&body.image)
    }
}
