use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::ai::{ChatCompletionsReviewer, PetitionReviewer, UnavailableReviewer};
use crate::config::ai::ReviewerConfig;
use crate::config::db::DbKind;
use crate::config::imaging::ImagingConfig;
use crate::domain::Catalog;
use crate::error::AppError;
use crate::imaging::{FlavorImageGenerator, HttpImageGenerator, ImageStore, LocalImageStore};
use crate::infra::db::bootstrap_db;
use crate::repos::catalog::load_catalog;
use crate::state::app_state::{AppState, FlavorImages};
use crate::state::rng::RngSource;

/// Builder for [`AppState`] (used in both tests and main).
///
/// With a database, the seed catalog is written into empty master tables
/// and the catalog served is whatever the database then holds.
pub struct StateBuilder {
    db_kind: Option<DbKind>,
    seed_catalog: Option<Catalog>,
    reviewer: Option<Arc<dyn PetitionReviewer>>,
    review_timeout: Option<Duration>,
    images: Option<FlavorImages>,
    rng: RngSource,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_kind: None,
            seed_catalog: None,
            reviewer: None,
            review_timeout: None,
            images: None,
            rng: RngSource::default(),
        }
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    /// Catalog to seed with instead of the built-in one.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.seed_catalog = Some(catalog);
        self
    }

    pub fn with_reviewer(mut self, reviewer: Arc<dyn PetitionReviewer>) -> Self {
        self.reviewer = Some(reviewer);
        self
    }

    pub fn with_review_timeout(mut self, timeout: Duration) -> Self {
        self.review_timeout = Some(timeout);
        self
    }

    pub fn with_images(
        mut self,
        generator: Arc<dyn FlavorImageGenerator>,
        store: Arc<dyn ImageStore>,
    ) -> Self {
        self.images = Some(FlavorImages { generator, store });
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = RngSource::seeded(seed);
        self
    }

    /// Wire reviewer and image pipeline from `POLIS_AI_*` / `POLIS_IMAGE_*`
    /// variables, leaving explicit `with_*` choices alone.
    pub fn with_env_collaborators(mut self) -> Result<Self, AppError> {
        if self.reviewer.is_none() {
            match ReviewerConfig::from_env()? {
                Some(config) => {
                    self.review_timeout.get_or_insert(config.timeout);
                    let reviewer = ChatCompletionsReviewer::new(config)
                        .map_err(|e| AppError::config(e.to_string()))?;
                    self.reviewer = Some(Arc::new(reviewer));
                }
                None => warn!("POLIS_AI_API_KEY not set; petitions are disabled"),
            }
        }

        if self.images.is_none() {
            if let Some(config) = ImagingConfig::from_env()? {
                let generator = HttpImageGenerator::new(&config)
                    .map_err(|e| AppError::config(e.to_string()))?;
                self.images = Some(FlavorImages {
                    generator: Arc::new(generator),
                    store: Arc::new(LocalImageStore::from_config(&config)),
                });
                info!(endpoint = %config.endpoint, "Flavor images enabled");
            }
        }
        Ok(self)
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let seed = match self.seed_catalog {
            Some(catalog) => catalog,
            None => Catalog::builtin()?,
        };

        let (db, catalog) = match self.db_kind {
            Some(kind) => {
                let conn = bootstrap_db(kind, &seed).await?;
                let catalog = load_catalog(&conn).await?;
                (Some(conn), catalog)
            }
            None => (None, seed),
        };

        let reviewer = self
            .reviewer
            .unwrap_or_else(|| Arc::new(UnavailableReviewer));
        let mut state = AppState::new(db, Arc::new(catalog), reviewer);
        if let Some(timeout) = self.review_timeout {
            state.review_timeout = timeout;
        }
        state.images = self.images;
        state.rng = self.rng;
        Ok(state)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
