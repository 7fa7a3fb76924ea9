use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use super::dto::{ProfileResponse, UpdateProfileRequest};
use super::repo;
use crate::error::ApiError;
use crate::state::AppState;

pub const CV_MAX_BYTES: usize = 5 * 1024 * 1024;

const CV_ALLOWED_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

pub fn is_allowed_cv_type(content_type: &str) -> bool {
    CV_ALLOWED_TYPES.contains(&content_type)
}

/// `<userId>_<uuid>.<ext>`; the extension is taken from the client filename.
pub fn generate_cv_filename(user_id: Uuid, original_filename: &str) -> String {
    let ext = original_filename
        .rsplit_once('.')
        .map(|(_, ext)| format!(".{ext}"))
        .unwrap_or_default();
    format!("{}_{}{}", user_id, Uuid::new_v4(), ext)
}

pub async fn get_profile(state: &AppState, user_id: Uuid) -> Result<ProfileResponse, ApiError> {
    let user = repo::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    Ok(user.into())
}

pub async fn update_profile(
    state: &AppState,
    user_id: Uuid,
    body: UpdateProfileRequest,
) -> Result<ProfileResponse, ApiError> {
    body.validate()?;

    let mut user = repo::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    body.apply(&mut user);

    let updated = repo::save_profile(&state.db, &user).await?;
    info!(user_id = %user_id, "profile updated");
    Ok(updated.into())
}

/// Store new CV bytes and record both filenames. Prior bytes are deleted
/// first so the upload directory does not leak files.
pub async fn upload_cv(
    state: &AppState,
    user_id: Uuid,
    original_filename: &str,
    content_type: &str,
    body: Bytes,
) -> Result<(), ApiError> {
    if body.is_empty() {
        return Err(ApiError::Payload("File is empty"));
    }
    if body.len() > CV_MAX_BYTES {
        return Err(ApiError::Payload("File too large (max 5 MiB)"));
    }
    if !is_allowed_cv_type(content_type) {
        return Err(ApiError::Payload("File type not accepted"));
    }

    let user = repo::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    if let Some(old) = &user.cv_filename {
        state.cv_store.delete(old).await?;
    }

    let filename = generate_cv_filename(user_id, original_filename);
    state.cv_store.save(&filename, body).await?;
    repo::set_cv_filenames(&state.db, user_id, Some(&filename), Some(original_filename)).await?;

    info!(user_id = %user_id, filename = %filename, "cv uploaded");
    Ok(())
}

/// Returns (bytes, original filename, content type) for streaming.
pub async fn download_cv(
    state: &AppState,
    user_id: Uuid,
) -> Result<(Vec<u8>, String, &'static str), ApiError> {
    let user = repo::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let filename = user.cv_filename.ok_or(ApiError::NotFound("CV"))?;
    let bytes = state
        .cv_store
        .read(&filename)
        .await?
        .ok_or(ApiError::NotFound("CV"))?;

    let original = user.cv_original_filename.unwrap_or(filename.clone());
    Ok((bytes, original, content_type_for(&filename)))
}

/// Idempotent: succeeds when no CV is recorded.
pub async fn delete_cv(state: &AppState, user_id: Uuid) -> Result<(), ApiError> {
    let user = repo::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    if let Some(filename) = &user.cv_filename {
        state.cv_store.delete(filename).await?;
    }
    repo::set_cv_filenames(&state.db, user_id, None, None).await?;

    info!(user_id = %user_id, "cv deleted");
    Ok(())
}

fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, ext)| ext) {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cv_filename_embeds_owner_and_extension() {
        let user_id = Uuid::new_v4();
        let name = generate_cv_filename(user_id, "resume-v2.pdf");
        assert!(name.starts_with(&format!("{user_id}_")));
        assert!(name.ends_with(".pdf"));

        let another = generate_cv_filename(user_id, "resume-v2.pdf");
        assert_ne!(name, another);
    }

    #[test]
    fn cv_filename_without_extension() {
        let name = generate_cv_filename(Uuid::new_v4(), "resume");
        assert!(!name.contains('.'));
    }

    #[test]
    fn content_type_allow_list() {
        assert!(is_allowed_cv_type("application/pdf"));
        assert!(is_allowed_cv_type("application/msword"));
        assert!(is_allowed_cv_type(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        ));
        assert!(!is_allowed_cv_type("image/png"));
        assert!(!is_allowed_cv_type("text/html"));
    }

    #[test]
    fn content_type_from_stored_name() {
        assert_eq!(content_type_for("u_1.pdf"), "application/pdf");
        assert_eq!(content_type_for("u_1.doc"), "application/msword");
        assert_eq!(content_type_for("u_1"), "application/octet-stream");
    }
}
