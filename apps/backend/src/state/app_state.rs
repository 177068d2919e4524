use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use super::rng::RngSource;
use crate::ai::PetitionReviewer;
use crate::config::ai::DEFAULT_AI_TIMEOUT_SECS;
use crate::domain::Catalog;
use crate::imaging::{FlavorImageGenerator, ImageStore};

/// Generator and store for post-resolution flavor images.
#[derive(Clone)]
pub struct FlavorImages {
    pub generator: Arc<dyn FlavorImageGenerator>,
    pub store: Arc<dyn ImageStore>,
}

/// Shared resources handed to every request.
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent in a few transport-only tests)
    pub db: Option<DatabaseConnection>,
    pub catalog: Arc<Catalog>,
    pub reviewer: Arc<dyn PetitionReviewer>,
    /// Upper bound on a single petition review
    pub review_timeout: Duration,
    pub images: Option<FlavorImages>,
    pub rng: RngSource,
}

impl AppState {
    pub fn new(
        db: Option<DatabaseConnection>,
        catalog: Arc<Catalog>,
        reviewer: Arc<dyn PetitionReviewer>,
    ) -> Self {
        Self {
            db,
            catalog,
            reviewer,
            review_timeout: Duration::from_secs(DEFAULT_AI_TIMEOUT_SECS),
            images: None,
            rng: RngSource::default(),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("policies", &self.catalog.policies.len())
            .field("ideologies", &self.catalog.ideologies.len())
            .field("review_timeout", &self.review_timeout)
            .field("images", &self.images.is_some())
            .field("rng", &self.rng)
            .finish()
    }
}
