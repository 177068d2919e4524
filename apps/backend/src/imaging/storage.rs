use std::path::PathBuf;

use async_trait::async_trait;

use super::ImagingError;
use crate::config::imaging::ImagingConfig;

/// Persists rendered images and returns a public URL.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(&self, room_id: &str, turn: u32, bytes: Vec<u8>) -> Result<String, ImagingError>;
}

/// Writes `<dir>/<room>/turn-<n>.png` and serves it from `<base_url>/<room>/turn-<n>.png`.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    base_url: String,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ImagingConfig) -> Self {
        Self::new(config.output_dir.clone(), config.public_base_url.clone())
    }

    fn file_name(turn: u32) -> String {
        format!("turn-{turn}.png")
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn upload(&self, room_id: &str, turn: u32, bytes: Vec<u8>) -> Result<String, ImagingError> {
        let dir = self.root.join(room_id);
        tokio::fs::create_dir_all(&dir).await?;
        let name = Self::file_name(turn);
        tokio::fs::write(dir.join(&name), bytes).await?;
        Ok(format!("{}/{room_id}/{name}", self.base_url))
    }
}
