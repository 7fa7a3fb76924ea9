use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{AuthResponse, LoginRequest, RegisterRequest, UserDto};
use super::extractor::AuthUser;
use super::services;
use crate::error::ApiError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

#[instrument(skip(state, body))]
async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let response = services::register(&state, body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(state, body))]
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    Ok(Json(services::login(&state, body).await?))
}

#[instrument(skip(state))]
async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<UserDto>, ApiError> {
    Ok(Json(services::current_user(&state, auth.user_id).await?))
}
