use actix_web::test;
use polis_backend::ai::ScriptedReviewer;
use polis_backend::build_state;

use crate::common::test_state;
use crate::support::app_builder::build_app;
use crate::support::http::{call_json, get};

#[actix_web::test]
async fn health_reports_database_and_catalog() {
    let app = build_app(test_state(ScriptedReviewer::new()).await).await;

    let body = call_json(&app, get("/health", None), 200).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["policies"], 30);
    assert_eq!(body["ideologies"], 6);
    assert!(body["migrations"].as_u64().unwrap() >= 1);
    assert!(body.get("db_error").is_none());
}

#[actix_web::test]
async fn health_without_database_still_answers() {
    let state = build_state().build().await.unwrap();
    let app = build_app(state).await;

    let resp = test::call_service(&app, get("/health", None)).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().contains_key("x-trace-id"));

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["db"], "error");
    assert!(body["db_error"]
        .as_str()
        .unwrap()
        .contains("Database not configured"));
}
