pub mod auth;
pub mod items;

use axum::{Json, response::IntoResponse};

/// GET /health — liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
