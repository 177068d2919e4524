use actix_web::{web, HttpResponse};
use migration::count_applied_migrations;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::db::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    migrations: Option<usize>,
    policies: usize,
    ideologies: usize,
    time: String,
}

/// GET /health
///
/// Always 200 while the process is up; the `db` field reports whether a
/// trivial query succeeds.
async fn health(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let (db, db_error, migrations) = match require_db(&state) {
        Ok(conn) => {
            let ping = conn
                .execute_unprepared("SELECT 1")
                .await
                .map_err(|e| e.to_string());
            match ping {
                Ok(_) => ("ok", None, count_applied_migrations(conn).await.ok()),
                Err(e) => ("error", Some(format!("DB query failed: {e}")), None),
            }
        }
        Err(e) => ("error", Some(e.to_string()), None),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db,
        db_error,
        migrations,
        policies: state.catalog.policies.len(),
        ideologies: state.catalog.ideologies.len(),
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
