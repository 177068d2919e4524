use std::env;

use actix_cors::Cors;
use actix_web::http::header;

const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Origins from comma-separated `CORS_ALLOWED_ORIGINS`; only http(s)
/// entries are kept, and localhost is used when none remain.
pub fn allowed_origins() -> Vec<String> {
    let raw = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();
    let configured: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();
    if configured.is_empty() {
        DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        configured
    }
}

pub fn cors_middleware() -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("x-user-id"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .max_age(3600);

    for origin in allowed_origins() {
        cors = cors.allowed_origin(&origin);
    }
    cors
}
