use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::validate::{max_len, require_email, require_len};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub current_position: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_email("email", &self.email)?;
        if self.password.chars().count() < 8 {
            return Err(ApiError::validation(
                "password",
                "Password must be at least 8 characters",
            ));
        }
        require_len("fullName", &self.full_name, 1, 100)?;
        if let Some(v) = &self.current_position {
            max_len("currentPosition", v, 100)?;
        }
        if let Some(v) = &self.company {
            max_len("company", v, 100)?;
        }
        if let Some(v) = &self.location {
            max_len("location", v, 100)?;
        }
        if let Some(v) = &self.phone {
            max_len("phone", v, 20)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Identity triple returned by register, login and `GET /me`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserDto,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register() -> RegisterRequest {
        RegisterRequest {
            email: "a@b.c".into(),
            password: "Pa$$w0rd!".into(),
            full_name: "Ada".into(),
            current_position: None,
            company: None,
            location: None,
            phone: None,
        }
    }

    #[test]
    fn accepts_valid_payload() {
        assert!(valid_register().validate().is_ok());
    }

    #[test]
    fn rejects_bad_email_and_short_password() {
        let mut req = valid_register();
        req.email = "nope".into();
        assert!(req.validate().is_err());

        let mut req = valid_register();
        req.password = "short".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_empty_full_name() {
        let mut req = valid_register();
        req.full_name = "".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn auth_response_never_leaks_password_hash() {
        let resp = AuthResponse {
            user: UserDto {
                id: Uuid::new_v4(),
                email: "a@b.c".into(),
                full_name: Some("Ada".into()),
            },
            access_token: "tok".into(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("passwordHash"));
        assert!(json.contains("accessToken"));
        assert!(json.contains("fullName"));
    }
}
