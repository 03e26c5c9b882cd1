use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::error;

use bazaar_files::Storage;
use bazaar_store::{AccountStore, PostStore};
use bazaar_types::api::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

pub type AppState = Arc<AppStateInner>;

/// Shared state for all route handlers, built once at startup and injected.
pub struct AppStateInner {
    pub accounts: AccountStore,
    pub posts: PostStore,
    pub storage: Storage,
}

/// POST /auth/register — create an account. 409 when the username is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let created = state
        .accounts
        .add_account(&req.username, &req.password)
        .map_err(|e| {
            error!("Registration failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    if !created {
        return Err(StatusCode::CONFLICT);
    }

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            username: req.username,
        }),
    ))
}

/// POST /auth/login — verify a credential. Unknown username and wrong
/// password both collapse to 401.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let verdict = state
        .accounts
        .login(&req.username, &req.password)
        .map_err(|e| {
            error!("Login failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    match verdict {
        Some(true) => Ok(Json(LoginResponse {
            username: req.username,
        })),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
