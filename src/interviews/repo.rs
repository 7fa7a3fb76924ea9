use sqlx::types::Json;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{Interview, InterviewMode, InterviewStatus, InterviewType};

const COLUMNS: &str = "id, user_id, application_id, title, type, start_at, end_at, timezone, \
     mode, location, meeting_url, status, notes, feedback, checklist_items, questions_to_ask, \
     links, created_at, updated_at";

pub struct NewInterview {
    pub user_id: Uuid,
    pub application_id: Uuid,
    pub title: String,
    pub kind: InterviewType,
    pub start_at: OffsetDateTime,
    pub end_at: Option<OffsetDateTime>,
    pub timezone: Option<String>,
    pub mode: InterviewMode,
    pub location: Option<String>,
    pub meeting_url: Option<String>,
    pub notes: Option<String>,
    pub checklist_items: Option<Vec<String>>,
    pub questions_to_ask: Option<Vec<String>>,
    pub links: Option<Vec<String>>,
}

pub async fn insert(db: &PgPool, new: NewInterview) -> anyhow::Result<Interview> {
    let interview = sqlx::query_as::<_, Interview>(&format!(
        r#"
        INSERT INTO interviews
            (user_id, application_id, title, type, start_at, end_at, timezone,
             mode, location, meeting_url, notes, checklist_items, questions_to_ask, links)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(new.user_id)
    .bind(new.application_id)
    .bind(new.title)
    .bind(new.kind)
    .bind(new.start_at)
    .bind(new.end_at)
    .bind(new.timezone)
    .bind(new.mode)
    .bind(new.location)
    .bind(new.meeting_url)
    .bind(new.notes)
    .bind(new.checklist_items.map(Json))
    .bind(new.questions_to_ask.map(Json))
    .bind(new.links.map(Json))
    .fetch_one(db)
    .await?;
    Ok(interview)
}

pub async fn find_by_id_and_user(
    db: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> anyhow::Result<Option<Interview>> {
    let interview = sqlx::query_as::<_, Interview>(&format!(
        "SELECT {COLUMNS} FROM interviews WHERE id = $1 AND user_id = $2"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(interview)
}

pub async fn save(db: &PgPool, interview: &Interview) -> anyhow::Result<Interview> {
    let saved = sqlx::query_as::<_, Interview>(&format!(
        r#"
        UPDATE interviews
        SET title = $3, type = $4, start_at = $5, end_at = $6, timezone = $7,
            mode = $8, location = $9, meeting_url = $10, status = $11,
            notes = $12, feedback = $13, checklist_items = $14,
            questions_to_ask = $15, links = $16, updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING {COLUMNS}
        "#
    ))
    .bind(interview.id)
    .bind(interview.user_id)
    .bind(&interview.title)
    .bind(interview.kind)
    .bind(interview.start_at)
    .bind(interview.end_at)
    .bind(&interview.timezone)
    .bind(interview.mode)
    .bind(&interview.location)
    .bind(&interview.meeting_url)
    .bind(interview.status)
    .bind(&interview.notes)
    .bind(&interview.feedback)
    .bind(&interview.checklist_items)
    .bind(&interview.questions_to_ask)
    .bind(&interview.links)
    .fetch_one(db)
    .await?;
    Ok(saved)
}

pub async fn delete_by_id_and_user(db: &PgPool, id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM interviews WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Cleanup hook invoked when an application is deleted; returns how many
/// interviews were removed.
pub async fn delete_by_application(
    db: &PgPool,
    application_id: Uuid,
    user_id: Uuid,
) -> anyhow::Result<u64> {
    let result =
        sqlx::query("DELETE FROM interviews WHERE application_id = $1 AND user_id = $2")
            .bind(application_id)
            .bind(user_id)
            .execute(db)
            .await?;
    Ok(result.rows_affected())
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Interview>> {
    let rows = sqlx::query_as::<_, Interview>(&format!(
        "SELECT {COLUMNS} FROM interviews WHERE user_id = $1 ORDER BY start_at ASC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Inclusive on both bounds.
pub async fn list_by_user_in_range(
    db: &PgPool,
    user_id: Uuid,
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> anyhow::Result<Vec<Interview>> {
    let rows = sqlx::query_as::<_, Interview>(&format!(
        "SELECT {COLUMNS} FROM interviews \
         WHERE user_id = $1 AND start_at >= $2 AND start_at <= $3 \
         ORDER BY start_at ASC"
    ))
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_by_user_and_status(
    db: &PgPool,
    user_id: Uuid,
    status: InterviewStatus,
) -> anyhow::Result<Vec<Interview>> {
    let rows = sqlx::query_as::<_, Interview>(&format!(
        "SELECT {COLUMNS} FROM interviews WHERE user_id = $1 AND status = $2 \
         ORDER BY start_at ASC"
    ))
    .bind(user_id)
    .bind(status)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_by_application(
    db: &PgPool,
    application_id: Uuid,
    user_id: Uuid,
) -> anyhow::Result<Vec<Interview>> {
    let rows = sqlx::query_as::<_, Interview>(&format!(
        "SELECT {COLUMNS} FROM interviews \
         WHERE user_id = $1 AND application_id = $2 \
         ORDER BY start_at ASC"
    ))
    .bind(user_id)
    .bind(application_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
