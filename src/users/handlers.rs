use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{CvUploadResponse, MessageResponse, ProfileResponse, UpdateProfileRequest};
use super::services;
use crate::auth::extractor::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/profile", get(get_profile).put(update_profile))
        .route(
            "/users/profile/cv",
            post(upload_cv).get(download_cv).delete(delete_cv),
        )
        // multipart body cap: 5 MiB payload plus form overhead
        .layer(DefaultBodyLimit::max(services::CV_MAX_BYTES + 64 * 1024))
}

#[instrument(skip(state))]
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    Ok(Json(services::get_profile(&state, auth.user_id).await?))
}

#[instrument(skip(state, body))]
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    Ok(Json(
        services::update_profile(&state, auth.user_id, body).await?,
    ))
}

#[instrument(skip(state, multipart))]
async fn upload_cv(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<CvUploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::Payload("Malformed multipart body"))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let original_filename = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or(ApiError::Payload("Missing filename"))?;
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".into());
        let body = field
            .bytes()
            .await
            .map_err(|_| ApiError::Payload("File too large (max 5 MiB)"))?;

        services::upload_cv(&state, auth.user_id, &original_filename, &content_type, body)
            .await?;

        return Ok(Json(CvUploadResponse {
            filename: original_filename,
            message: "CV uploaded".into(),
        }));
    }

    Err(ApiError::Payload("Multipart field 'file' is required"))
}

#[instrument(skip(state))]
async fn download_cv(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let (bytes, original_filename, content_type) =
        services::download_cv(&state, auth.user_id).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{original_filename}\""))
            .map_err(|e| ApiError::Internal(e.into()))?,
    );
    Ok((headers, bytes))
}

#[instrument(skip(state))]
async fn delete_cv(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    services::delete_cv(&state, auth.user_id).await?;
    Ok(Json(MessageResponse {
        message: "CV deleted".into(),
    }))
}
