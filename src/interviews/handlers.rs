use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{CreateInterviewRequest, InterviewListParams, UpdateInterviewRequest};
use super::repo_types::Interview;
use super::services;
use crate::auth::extractor::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/interviews", get(list).post(create))
        .route(
            "/interviews/:id",
            get(get_one).patch(update).delete(delete),
        )
        .route("/interviews/by-application/:id", get(list_by_application))
}

#[instrument(skip(state))]
async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<InterviewListParams>,
) -> Result<Json<Vec<Interview>>, ApiError> {
    Ok(Json(services::list(&state, auth.user_id, params).await?))
}

#[instrument(skip(state))]
async fn get_one(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Interview>, ApiError> {
    Ok(Json(services::get(&state, id, auth.user_id).await?))
}

#[instrument(skip(state, body))]
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateInterviewRequest>,
) -> Result<(StatusCode, Json<Interview>), ApiError> {
    let created = services::create(&state, auth.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, body))]
async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateInterviewRequest>,
) -> Result<Json<Interview>, ApiError> {
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
async fn list_by_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Interview>>, ApiError> {
    Ok(Json(
        services::list_by_application(&state, id, auth.user_id).await?,
    ))
}
