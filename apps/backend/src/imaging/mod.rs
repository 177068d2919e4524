//! Flavor images: a rendered picture of the city after each resolution.
//! Purely decorative; callers log failures and carry on.

mod generator;
pub mod prompt;
mod storage;

pub use generator::{FlavorImageGenerator, HttpImageGenerator};
pub use storage::{ImageStore, LocalImageStore};

#[derive(Debug, thiserror::Error)]
pub enum ImagingError {
    #[error("image generator request failed: {0}")]
    Transport(String),
    #[error("image generator timed out")]
    Timeout,
    #[error("image generator reply malformed: {0}")]
    Malformed(String),
    #[error("image storage failed: {0}")]
    Storage(#[from] std::io::Error),
}
