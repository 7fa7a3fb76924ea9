use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{CreateApplicationRequest, StatsResponse, UpdateApplicationRequest};
use super::repo_types::Application;
use super::services;
use crate::auth::extractor::AuthUser;
use crate::error::ApiError;
use crate::pagination::{PageParams, PageResponse};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/applications", get(list).post(create))
        .route("/applications/stats", get(stats))
        .route(
            "/applications/:id",
            get(get_one).patch(update).delete(delete),
        )
}

#[instrument(skip(state))]
async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<PageResponse<Application>>, ApiError> {
    Ok(Json(services::list(&state, auth.user_id, params).await?))
}

#[instrument(skip(state))]
async fn get_one(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Application>, ApiError> {
    Ok(Json(services::get(&state, id, auth.user_id).await?))
}

#[instrument(skip(state, body))]
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<Application>), ApiError> {
    let created = services::create(&state, auth.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, body))]
async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateApplicationRequest>,
) -> Result<Json<Application>, ApiError> {
    Ok(Json(
        services::update(&state, id, auth.user_id, body).await?,
    ))
}

#[instrument(skip(state))]
async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    services::delete(&state, id, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<StatsResponse>, ApiError> {
    Ok(Json(services::stats(&state, auth.user_id).await?))
}
