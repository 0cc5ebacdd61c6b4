use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every check passes, otherwise `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the image storage root exists.
    pub uploads_ready: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = gearlist_db::health_check(&state.pool).await.is_ok();
    let uploads_ready = tokio::fs::try_exists(state.images.root())
        .await
        .unwrap_or(false);

    let status = if db_healthy && uploads_ready {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        uploads_ready,
    })
}

/// Health route, merged at the root next to the application routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
