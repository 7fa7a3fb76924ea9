use axum::extract::FromRef;
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{AuthResponse, LoginRequest, RegisterRequest, UserDto};
use super::jwt::JwtKeys;
use super::password::PasswordHasher;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::{self, NewUser};

pub async fn register(state: &AppState, body: RegisterRequest) -> Result<AuthResponse, ApiError> {
    body.validate()?;

    // Case-insensitive uniqueness; the unique index on lower(email) backs
    // this up against concurrent registrations.
    if repo::find_by_email(&state.db, &body.email).await?.is_some() {
        warn!(email = %body.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered"));
    }

    let hasher = PasswordHasher::new(&state.config.hasher).map_err(ApiError::Internal)?;
    let password_hash = hasher.hash(&body.password).map_err(ApiError::Internal)?;

    let user = repo::insert(
        &state.db,
        NewUser {
            email: body.email.trim(),
            password_hash: &password_hash,
            full_name: &body.full_name,
            current_position: body.current_position.as_deref(),
            company: body.company.as_deref(),
            location: body.location.as_deref(),
            phone: body.phone.as_deref(),
        },
    )
    .await?;

    let keys = JwtKeys::from_ref(state);
    let access_token = keys.issue(user.id, &user.email).map_err(ApiError::Internal)?;

    info!(user_id = %user.id, "user registered");
    Ok(AuthResponse {
        user: UserDto {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
        },
        access_token,
    })
}

pub async fn login(state: &AppState, body: LoginRequest) -> Result<AuthResponse, ApiError> {
    // Unknown email and wrong password must be indistinguishable.
    let invalid = || ApiError::Unauthorized("Invalid credentials");

    let Some(user) = repo::find_by_email(&state.db, body.email.trim()).await? else {
        warn!("login with unknown email");
        return Err(invalid());
    };

    let hasher = PasswordHasher::new(&state.config.hasher).map_err(ApiError::Internal)?;
    if !hasher
        .verify(&body.password, &user.password_hash)
        .map_err(ApiError::Internal)?
    {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(invalid());
    }

    let keys = JwtKeys::from_ref(state);
    let access_token = keys.issue(user.id, &user.email).map_err(ApiError::Internal)?;

    info!(user_id = %user.id, "user logged in");
    Ok(AuthResponse {
        user: UserDto {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
        },
        access_token,
    })
}

pub async fn current_user(state: &AppState, user_id: Uuid) -> Result<UserDto, ApiError> {
    let user = repo::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::Unauthorized("User not found"))?;
    Ok(UserDto {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
    })
}
