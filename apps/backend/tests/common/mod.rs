#![allow(dead_code)]

use std::sync::Arc;

use polis_backend::ai::{PetitionReviewer, ScriptedReviewer};
use polis_backend::config::db::DbKind;
use polis_backend::domain::Catalog;
use polis_backend::infra::state::build_state;
use polis_backend::{AppState, RoomService};

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Seed shared by tests that want reproducible shuffles.
pub const TEST_SEED: u64 = 0x5eed_0001;

/// Database for tests that do not need a private catalog:
/// `POLIS_TEST_DB_KIND` (e.g. `postgres`), else in-memory SQLite.
pub fn test_db_kind() -> DbKind {
    std::env::var("POLIS_TEST_DB_KIND")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DbKind::SqliteMemory)
}

/// State with a fresh database, the built-in catalog, a seeded RNG and the
/// given reviewer.
pub async fn test_state(reviewer: ScriptedReviewer) -> AppState {
    build_state()
        .with_db(test_db_kind())
        .with_reviewer(Arc::new(reviewer) as Arc<dyn PetitionReviewer>)
        .with_rng_seed(TEST_SEED)
        .build()
        .await
        .expect("test state builds")
}

/// State over a private in-memory database seeded with `catalog`.
pub async fn state_with_catalog(catalog: Catalog) -> AppState {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_catalog(catalog)
        .with_rng_seed(TEST_SEED)
        .build()
        .await
        .expect("test state builds")
}

/// State over a SQLite file inside `dir`, with the built-in catalog.
///
/// Sets `POLIS_SQLITE_PATH`; callers must be `#[serial]`.
pub async fn sqlite_file_state(dir: &tempfile::TempDir) -> AppState {
    std::env::set_var("POLIS_SQLITE_PATH", dir.path().join("polis.db"));
    build_state()
        .with_db(DbKind::SqliteFile)
        .with_rng_seed(TEST_SEED)
        .build()
        .await
        .expect("file-backed state builds")
}

pub fn service(state: &AppState) -> RoomService {
    RoomService::new(state).expect("state has a database")
}
