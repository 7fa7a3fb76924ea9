use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::User;
use crate::error::ApiError;
use crate::patch::Patch;
use crate::validate::{max_len, require_len};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub current_position: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub cv_filename: Option<String>,
    pub cv_original_filename: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for ProfileResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            full_name: u.full_name,
            current_position: u.current_position,
            company: u.company,
            location: u.location,
            phone: u.phone,
            bio: u.bio,
            linkedin_url: u.linkedin_url,
            portfolio_url: u.portfolio_url,
            cv_filename: u.cv_filename,
            cv_original_filename: u.cv_original_filename,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Partial profile update. `fullName` can be replaced but not cleared; the
/// rest are nullable, so explicit `null` clears them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    #[serde(default)]
    pub current_position: Patch<String>,
    #[serde(default)]
    pub company: Patch<String>,
    #[serde(default)]
    pub location: Patch<String>,
    #[serde(default)]
    pub phone: Patch<String>,
    #[serde(default)]
    pub bio: Patch<String>,
    #[serde(default)]
    pub linkedin_url: Patch<String>,
    #[serde(default)]
    pub portfolio_url: Patch<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(v) = &self.full_name {
            require_len("fullName", v, 1, 100)?;
        }
        if let Some(v) = self.current_position.value() {
            max_len("currentPosition", v, 100)?;
        }
        if let Some(v) = self.company.value() {
            max_len("company", v, 100)?;
        }
        if let Some(v) = self.location.value() {
            max_len("location", v, 100)?;
        }
        if let Some(v) = self.phone.value() {
            max_len("phone", v, 20)?;
        }
        if let Some(v) = self.bio.value() {
            max_len("bio", v, 500)?;
        }
        if let Some(v) = self.linkedin_url.value() {
            max_len("linkedinUrl", v, 200)?;
        }
        if let Some(v) = self.portfolio_url.value() {
            max_len("portfolioUrl", v, 200)?;
        }
        Ok(())
    }

    pub fn apply(self, user: &mut User) {
        if let Some(v) = self.full_name {
            user.full_name = Some(v);
        }
        self.current_position.apply_to(&mut user.current_position);
        self.company.apply_to(&mut user.company);
        self.location.apply_to(&mut user.location);
        self.phone.apply_to(&mut user.phone);
        self.bio.apply_to(&mut user.bio);
        self.linkedin_url.apply_to(&mut user.linkedin_url);
        self.portfolio_url.apply_to(&mut user.portfolio_url);
    }
}

#[derive(Debug, Serialize)]
pub struct CvUploadResponse {
    pub filename: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "Ada@Example.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            full_name: Some("Ada".into()),
            current_position: Some("SWE".into()),
            company: None,
            location: Some("Paris".into()),
            phone: None,
            bio: None,
            linkedin_url: None,
            portfolio_url: None,
            cv_filename: None,
            cv_original_filename: None,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn profile_response_omits_password_hash() {
        let json = serde_json::to_string(&ProfileResponse::from(sample_user())).unwrap();
        assert!(!json.contains("passwordHash"));
        assert!(!json.contains("argon2id"));
        assert!(json.contains("currentPosition"));
    }

    #[test]
    fn apply_distinguishes_missing_null_and_value() {
        let mut user = sample_user();
        let body: UpdateProfileRequest = serde_json::from_str(
            r#"{"location": null, "company": "Initech"}"#,
        )
        .unwrap();
        body.validate().unwrap();
        body.apply(&mut user);

        assert_eq!(user.location, None); // explicit null clears
        assert_eq!(user.company.as_deref(), Some("Initech")); // value replaces
        assert_eq!(user.current_position.as_deref(), Some("SWE")); // omitted keeps
        assert_eq!(user.full_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn bio_length_is_bounded() {
        let body = UpdateProfileRequest {
            bio: crate::patch::Patch::Value("x".repeat(501)),
            ..Default::default()
        };
        assert!(body.validate().is_err());
    }
}
