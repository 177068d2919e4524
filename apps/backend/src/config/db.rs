use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Which database backend a connection targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// Production Postgres
    Postgres,
    /// SQLite file at `POLIS_SQLITE_PATH`
    SqliteFile,
    /// Throwaway in-memory SQLite
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(DbKind::Postgres),
            "sqlite" | "sqlite-file" | "sqlite_file" => Ok(DbKind::SqliteFile),
            "memory" | "sqlite-memory" | "sqlite_memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "unknown database kind '{other}' (expected postgres, sqlite-file or sqlite-memory)"
            ))),
        }
    }
}

impl DbKind {
    /// Read the kind from `var`, falling back to `default` when unset.
    pub fn from_env_or(var: &str, default: DbKind) -> Result<Self, AppError> {
        match env::var(var) {
            Ok(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(default),
        }
    }

    pub fn is_sqlite(self) -> bool {
        matches!(self, DbKind::SqliteFile | DbKind::SqliteMemory)
    }
}

/// Build a connection URL for `kind` from environment variables.
pub fn db_url(kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = must_var("POLIS_DB")?;
            let username = must_var("POLIS_DB_USER")?;
            let password = must_var("POLIS_DB_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let path = must_var("POLIS_SQLITE_PATH")?;
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
