use std::collections::BTreeMap;

use tracing::info;
use uuid::Uuid;

use super::dto::{CreateApplicationRequest, StatsResponse, UpdateApplicationRequest};
use super::repo;
use super::repo_types::Application;
use crate::error::ApiError;
use crate::interviews;
use crate::pagination::{parse_sort, PageParams, PageResponse, SortSpec};
use crate::state::AppState;

const SORT_FIELDS: &[(&str, &str)] = &[
    ("updatedAt", "updated_at"),
    ("createdAt", "created_at"),
    ("appliedDate", "applied_date"),
    ("companyName", "company_name"),
    ("roleTitle", "role_title"),
    ("status", "status"),
];

const DEFAULT_SORT: SortSpec = SortSpec {
    column: "updated_at",
    descending: true,
};

pub async fn list(
    state: &AppState,
    user_id: Uuid,
    params: PageParams,
) -> Result<PageResponse<Application>, ApiError> {
    let sort = parse_sort(params.sort.as_deref(), SORT_FIELDS, DEFAULT_SORT);
    let items =
        repo::list_by_user(&state.db, user_id, &sort, params.limit(), params.offset()).await?;
    let total = repo::count_by_user(&state.db, user_id).await?;
    Ok(PageResponse::new(items, &params, total))
}

pub async fn get(state: &AppState, id: Uuid, user_id: Uuid) -> Result<Application, ApiError> {
    repo::find_by_id_and_user(&state.db, id, user_id)
        .await?
        .ok_or(ApiError::NotFound("Application"))
}

pub async fn create(
    state: &AppState,
    user_id: Uuid,
    body: CreateApplicationRequest,
) -> Result<Application, ApiError> {
    body.validate()?;
    let created = repo::insert(&state.db, body.into_new(user_id)).await?;
    info!(user_id = %user_id, application_id = %created.id, "application created");
    Ok(created)
}

pub async fn update(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
    body: UpdateApplicationRequest,
) -> Result<Application, ApiError> {
    body.validate()?;

    let mut app = get(state, id, user_id).await?;
    body.apply(&mut app);

    let saved = repo::save(&state.db, &app).await?;
    info!(user_id = %user_id, application_id = %id, "application updated");
    Ok(saved)
}

/// Deletes the application and cleans up its interviews. The store enforces
/// no cascade, so interviews orphaned by out-of-band deletions are a
/// repairable state, not an error.
pub async fn delete(state: &AppState, id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
    if !repo::delete_by_id_and_user(&state.db, id, user_id).await? {
        return Err(ApiError::NotFound("Application"));
    }
    let removed = interviews::repo::delete_by_application(&state.db, id, user_id).await?;
    info!(
        user_id = %user_id,
        application_id = %id,
        interviews_removed = removed,
        "application deleted"
    );
    Ok(())
}

pub async fn stats(state: &AppState, user_id: Uuid) -> Result<StatsResponse, ApiError> {
    let total = repo::count_by_user(&state.db, user_id).await?;
    let mut by_status = BTreeMap::new();
    for status in super::repo_types::ApplicationStatus::ALL {
        let count = repo::count_by_user_and_status(&state.db, user_id, status).await?;
        by_status.insert(status, count);
    }
    Ok(StatsResponse { total, by_status })
}
