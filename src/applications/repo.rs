use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Application, ApplicationLinks, ApplicationStatus, ApplicationSource, NextAction};
use crate::pagination::SortSpec;

const COLUMNS: &str = "id, user_id, company_name, role_title, location, source, status, \
     applied_date, salary, currency, tags, links, notes, next_action, created_at, updated_at";

pub struct NewApplication {
    pub user_id: Uuid,
    pub company_name: String,
    pub role_title: String,
    pub location: Option<String>,
    pub source: ApplicationSource,
    pub status: ApplicationStatus,
    pub applied_date: Option<String>,
    pub salary: Option<i64>,
    pub currency: String,
    pub tags: Option<Vec<String>>,
    pub links: Option<ApplicationLinks>,
    pub notes: Option<String>,
    pub next_action: Option<NextAction>,
}

pub async fn insert(db: &PgPool, new: NewApplication) -> anyhow::Result<Application> {
    let app = sqlx::query_as::<_, Application>(&format!(
        r#"
        INSERT INTO applications
            (user_id, company_name, role_title, location, source, status,
             applied_date, salary, currency, tags, links, notes, next_action)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(new.user_id)
    .bind(new.company_name)
    .bind(new.role_title)
    .bind(new.location)
    .bind(new.source)
    .bind(new.status)
    .bind(new.applied_date)
    .bind(new.salary)
    .bind(new.currency)
    .bind(new.tags.map(Json))
    .bind(new.links.map(Json))
    .bind(new.notes)
    .bind(new.next_action.map(Json))
    .fetch_one(db)
    .await?;
    Ok(app)
}

pub async fn find_by_id_and_user(
    db: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> anyhow::Result<Option<Application>> {
    let app = sqlx::query_as::<_, Application>(&format!(
        "SELECT {COLUMNS} FROM applications WHERE id = $1 AND user_id = $2"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(app)
}

/// Full-row rewrite after a read-modify-write; concurrent partial updates are
/// last-writer-wins, which the design accepts.
pub async fn save(db: &PgPool, app: &Application) -> anyhow::Result<Application> {
    let saved = sqlx::query_as::<_, Application>(&format!(
        r#"
        UPDATE applications
        SET company_name = $3, role_title = $4, location = $5, source = $6,
            status = $7, applied_date = $8, salary = $9, currency = $10,
            tags = $11, links = $12, notes = $13, next_action = $14,
            updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING {COLUMNS}
        "#
    ))
    .bind(app.id)
    .bind(app.user_id)
    .bind(&app.company_name)
    .bind(&app.role_title)
    .bind(&app.location)
    .bind(app.source)
    .bind(app.status)
    .bind(&app.applied_date)
    .bind(app.salary)
    .bind(&app.currency)
    .bind(&app.tags)
    .bind(&app.links)
    .bind(&app.notes)
    .bind(&app.next_action)
    .fetch_one(db)
    .await?;
    Ok(saved)
}

/// Returns whether a row was removed.
pub async fn delete_by_id_and_user(db: &PgPool, id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM applications WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Sort column comes from the whitelist in `services`, never from raw input.
pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    sort: &SortSpec,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Application>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM applications WHERE user_id = $1 \
         ORDER BY {} {}, id LIMIT $2 OFFSET $3",
        sort.column,
        sort.direction_sql()
    );
    let rows = sqlx::query_as::<_, Application>(&sql)
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn count_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM applications WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(db)
    .await?;
    Ok(count)
}

pub async fn count_by_user_and_status(
    db: &PgPool,
    user_id: Uuid,
    status: ApplicationStatus,
) -> anyhow::Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM applications WHERE user_id = $1 AND status = $2",
    )
    .bind(user_id)
    .bind(status)
    .fetch_one(db)
    .await?;
    Ok(count)
}
