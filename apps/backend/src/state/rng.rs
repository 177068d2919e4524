//! Randomness for deck shuffles, ideology draws, tie-breaks and generated ids.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Hands out a fresh `ChaCha8Rng` per operation.
///
/// `Seeded` derives each generator from the base seed and a counter, so a
/// sequence of operations is reproducible in tests.
#[derive(Debug, Clone, Default)]
pub enum RngSource {
    #[default]
    Entropy,
    Seeded { seed: u64, counter: Arc<AtomicU64> },
}

impl RngSource {
    pub fn seeded(seed: u64) -> Self {
        RngSource::Seeded {
            seed,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn rng(&self) -> ChaCha8Rng {
        match self {
            RngSource::Entropy => ChaCha8Rng::from_os_rng(),
            RngSource::Seeded { seed, counter } => {
                let n = counter.fetch_add(1, Ordering::Relaxed);
                ChaCha8Rng::seed_from_u64(seed.wrapping_add(n.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
            }
        }
    }
}
