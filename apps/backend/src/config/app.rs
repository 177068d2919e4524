//! HTTP server settings.

use std::env;

use crate::config::db::DbKind;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_kind: DbKind,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("BACKEND_PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let db_kind = DbKind::from_env_or("POLIS_DB_KIND", DbKind::Postgres)?;

        Ok(Self {
            host,
            port,
            db_kind,
        })
    }
}
