use tracing::info;
use uuid::Uuid;

use super::dto::{check_temporal, CreateInterviewRequest, InterviewListParams, UpdateInterviewRequest};
use super::repo;
use super::repo_types::Interview;
use crate::applications;
use crate::error::ApiError;
use crate::state::AppState;

/// Lists the principal's interviews, `startAt` ascending. When both the date
/// range and a status are supplied the result is their intersection; the
/// status part is filtered in memory, per-user cardinality being small.
pub async fn list(
    state: &AppState,
    user_id: Uuid,
    params: InterviewListParams,
) -> Result<Vec<Interview>, ApiError> {
    let interviews = match (params.from, params.to) {
        (Some(from), Some(to)) => {
            let rows = repo::list_by_user_in_range(&state.db, user_id, from, to).await?;
            match params.status {
                Some(status) => rows.into_iter().filter(|i| i.status == status).collect(),
                None => rows,
            }
        }
        _ => match params.status {
            Some(status) => repo::list_by_user_and_status(&state.db, user_id, status).await?,
            None => repo::list_by_user(&state.db, user_id).await?,
        },
    };
    Ok(interviews)
}

pub async fn get(state: &AppState, id: Uuid, user_id: Uuid) -> Result<Interview, ApiError> {
    repo::find_by_id_and_user(&state.db, id, user_id)
        .await?
        .ok_or(ApiError::NotFound("Interview"))
}

pub async fn list_by_application(
    state: &AppState,
    application_id: Uuid,
    user_id: Uuid,
) -> Result<Vec<Interview>, ApiError> {
    Ok(repo::list_by_application(&state.db, application_id, user_id).await?)
}

/// The referenced application must exist and belong to the same user; a
/// foreign application looks exactly like a missing one.
pub async fn create(
    state: &AppState,
    user_id: Uuid,
    body: CreateInterviewRequest,
) -> Result<Interview, ApiError> {
    body.validate()?;

    applications::services::get(state, body.application_id, user_id).await?;

    let created = repo::insert(&state.db, body.into_new(user_id)).await?;
    info!(
        user_id = %user_id,
        interview_id = %created.id,
        application_id = %created.application_id,
        "interview created"
    );
    Ok(created)
}

pub async fn update(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
    body: UpdateInterviewRequest,
) -> Result<Interview, ApiError> {
    body.validate()?;

    let mut interview = get(state, id, user_id).await?;
    body.apply(&mut interview);
    check_temporal(interview.start_at, interview.end_at)?;

    let saved = repo::save(&state.db, &interview).await?;
    info!(user_id = %user_id, interview_id = %id, "interview updated");
    Ok(saved)
}

pub async fn delete(state: &AppState, id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
    if !repo::delete_by_id_and_user(&state.db, id, user_id).await? {
        return Err(ApiError::NotFound("Interview"));
    }
    info!(user_id = %user_id, interview_id = %id, "interview deleted");
    Ok(())
}
