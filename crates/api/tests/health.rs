//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get};
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: SqlitePool) {
    let app = build_test_app(pool).await;
    let response = get(app.router(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["uploads_ready"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_is_degraded_without_upload_root(pool: SqlitePool) {
    let app = build_test_app(pool).await;
    std::fs::remove_dir_all(app.upload_dir()).unwrap();

    let json = body_json(get(app.router(), "/health").await).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["uploads_ready"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: SqlitePool) {
    let app = build_test_app(pool).await;
    let response = get(app.router(), "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: SqlitePool) {
    let app = build_test_app(pool).await;
    let response = get(app.router(), "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}
