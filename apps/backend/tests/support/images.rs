//! In-process flavor image doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use polis_backend::domain::{CityState, MasterPolicy};
use polis_backend::imaging::{FlavorImageGenerator, ImageStore, ImagingError};

/// Returns fixed bytes, or fails every call when `failing`.
#[derive(Default)]
pub struct StubGenerator {
    pub failing: bool,
    pub calls: AtomicUsize,
}

#[async_trait]
impl FlavorImageGenerator for StubGenerator {
    async fn generate(
        &self,
        _city: &CityState,
        _passed: &[MasterPolicy],
    ) -> Result<Vec<u8>, ImagingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(ImagingError::Transport("stub generator down".into()));
        }
        Ok(vec![0x89, b'P', b'N', b'G'])
    }
}

/// Hands out predictable URLs without touching the filesystem.
#[derive(Default)]
pub struct MemoryStore;

#[async_trait]
impl ImageStore for MemoryStore {
    async fn upload(&self, room_id: &str, turn: u32, _bytes: Vec<u8>) -> Result<String, ImagingError> {
        Ok(format!("mem://{room_id}/turn-{turn}.png"))
    }
}

pub fn working() -> (Arc<StubGenerator>, Arc<MemoryStore>) {
    (Arc::new(StubGenerator::default()), Arc::new(MemoryStore))
}

pub fn broken() -> (Arc<StubGenerator>, Arc<MemoryStore>) {
    (
        Arc::new(StubGenerator {
            failing: true,
            ..Default::default()
        }),
        Arc::new(MemoryStore),
    )
}
