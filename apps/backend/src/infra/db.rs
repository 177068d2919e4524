//! Connection bootstrap: connect, migrate, seed the master catalog.

use std::future::Future;
use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind};
use crate::domain::Catalog;
use crate::error::AppError;
use crate::repos::catalog as catalog_repo;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL_MS: u64 = 500;

fn engine_name(kind: DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Retry `connect_fn` at a fixed interval; returns the last error when all
/// attempts fail.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(conn) => {
                if attempt > 1 {
                    info!(attempts = attempt, "Database connection succeeded after retry");
                }
                return Ok(conn);
            }
            Err(e) if attempt < max_attempts => {
                warn!(attempt, max_attempts, interval_ms, error = %e, "Database connection failed, retrying");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn connect_options(kind: DbKind, url: String) -> ConnectOptions {
    let mut options = ConnectOptions::new(url);
    options
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    match kind {
        // Every pooled connection would get its own empty in-memory database
        DbKind::SqliteMemory => {
            options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(24 * 60 * 60))
                .max_lifetime(Duration::from_secs(24 * 60 * 60));
        }
        // SQLite takes one writer at a time; a single pooled connection makes
        // room transactions queue on acquire instead of failing with SQLITE_BUSY
        DbKind::SqliteFile => {
            options.max_connections(1).min_connections(1);
        }
        DbKind::Postgres => {
            options.max_connections(16);
        }
    }
    options
}

/// Open a connection pool for `kind`. Runs no migrations.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;
    let conn = retry_connection(
        || {
            let options = connect_options(kind, url.clone());
            async move { Database::connect(options).await.map_err(AppError::from) }
        },
        CONNECT_ATTEMPTS,
        CONNECT_RETRY_INTERVAL_MS,
    )
    .await?;
    info!(engine = engine_name(kind), "Database connected");
    Ok(conn)
}

/// Connect, apply pending migrations and seed `catalog` into empty master
/// tables.
pub async fn bootstrap_db(kind: DbKind, catalog: &Catalog) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(kind).await?;

    migration::migrate(&conn, MigrationCommand::Up).await?;
    let applied = migration::count_applied_migrations(&conn).await?;
    info!(engine = engine_name(kind), applied, "Migrations up to date");

    catalog_repo::seed_if_empty(&conn, catalog).await?;
    Ok(conn)
}
