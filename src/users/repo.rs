use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::User;

const USER_COLUMNS: &str = "id, email, password_hash, full_name, current_position, company, \
     location, phone, bio, linkedin_url, portfolio_url, cv_filename, cv_original_filename, \
     created_at, updated_at";

/// Case-insensitive lookup; the stored email keeps its original casing.
pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE lower(email) = lower($1)"
    ))
    .bind(email)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub full_name: &'a str,
    pub current_position: Option<&'a str>,
    pub company: Option<&'a str>,
    pub location: Option<&'a str>,
    pub phone: Option<&'a str>,
}

pub async fn insert(db: &PgPool, new: NewUser<'_>) -> anyhow::Result<User> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (email, password_hash, full_name, current_position, company, location, phone)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(new.email)
    .bind(new.password_hash)
    .bind(new.full_name)
    .bind(new.current_position)
    .bind(new.company)
    .bind(new.location)
    .bind(new.phone)
    .fetch_one(db)
    .await?;
    Ok(user)
}

/// Full-row profile rewrite; callers read-modify-write the record first.
pub async fn save_profile(db: &PgPool, user: &User) -> anyhow::Result<User> {
    let updated = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET full_name = $2, current_position = $3, company = $4, location = $5,
            phone = $6, bio = $7, linkedin_url = $8, portfolio_url = $9,
            updated_at = now()
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(user.id)
    .bind(&user.full_name)
    .bind(&user.current_position)
    .bind(&user.company)
    .bind(&user.location)
    .bind(&user.phone)
    .bind(&user.bio)
    .bind(&user.linkedin_url)
    .bind(&user.portfolio_url)
    .fetch_one(db)
    .await?;
    Ok(updated)
}

pub async fn set_cv_filenames(
    db: &PgPool,
    user_id: Uuid,
    filename: Option<&str>,
    original_filename: Option<&str>,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        UPDATE users
        SET cv_filename = $2, cv_original_filename = $3, updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(filename)
    .bind(original_filename)
    .execute(db)
    .await?;
    Ok(())
}
