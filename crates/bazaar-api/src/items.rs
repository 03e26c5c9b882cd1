use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;
use uuid::Uuid;

use bazaar_types::api::ItemResponse;

use crate::auth::AppState;

/// 10 MB cap on listing images.
const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

#[derive(Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub size: u64,
}

/// GET /items — every stored posting, oldest first.
pub async fn list_items(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, StatusCode> {
    let docs = state.posts.list_posts().map_err(|e| {
        error!("Listing posts failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let items: Vec<ItemResponse> = docs
        .into_iter()
        .map(|doc| ItemResponse {
            id: doc.id,
            fields: doc.data,
        })
        .collect();

    Ok(Json(items))
}

/// POST /items — persist a raw posting payload. 422 when the payload does
/// not match its category's schema.
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<impl IntoResponse, StatusCode> {
    let added = state.posts.add_post(&payload).map_err(|e| {
        error!("Storing post failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    if !added {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    Ok(StatusCode::CREATED)
}

/// GET /items/categories — the fixed category names.
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.posts.get_categories())
}

/// GET /items/categories/{category} — required field names, schema order.
pub async fn category_fields(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    match state.posts.get_keys(&category) {
        Some(fields) => Ok(Json(fields)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// POST /items/upload — raw image bytes (application/octet-stream), stored
/// under a generated name, public URL returned.
pub async fn upload_image(
    State(state): State<AppState>,
    bytes: Bytes,
) -> Result<impl IntoResponse, StatusCode> {
    if bytes.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    if bytes.len() > MAX_UPLOAD_SIZE {
        return Err(StatusCode::PAYLOAD_TOO_LARGE);
    }

    let remote_path = format!("images/{}", Uuid::new_v4());
    let url = state
        .storage
        .upload(&bytes, &remote_path)
        .await
        .map_err(|e| {
            error!("Upload failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url,
            size: bytes.len() as u64,
        }),
    ))
}
