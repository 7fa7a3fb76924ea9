use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::state::AppState;

/// Bearer token payload. `sub` duplicates `userId` so the subject claim stays
/// standard while clients keep the explicit field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Why a token failed verification.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("bad signature")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("missing claim")]
    MissingClaim,
}

/// HMAC-SHA256 signing material plus the configured token lifetime. Built
/// once per request from `AppState`; the underlying secret is process-wide
/// and never rewritten after startup.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub lifetime: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let cfg = &state.config.token;
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            lifetime: Duration::milliseconds(cfg.lifetime_ms),
        }
    }
}

impl JwtKeys {
    pub fn issue(&self, user_id: Uuid, email: &str) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + self.lifetime;
        let claims = Claims {
            sub: user_id,
            user_id,
            email: email.to_string(),
            iat: now.unix_timestamp(),
            exp: exp.unix_timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "token issued");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::default();
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => {
                debug!(user_id = %data.claims.user_id, "token verified");
                Ok(data.claims)
            }
            Err(e) => Err(match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::MissingRequiredClaim(_) => TokenError::MissingClaim,
                _ => TokenError::Malformed,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str, lifetime_ms: i64) -> JwtKeys {
        JwtKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::milliseconds(lifetime_ms),
        }
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let keys = make_keys("a-unit-test-secret-of-enough-length", 60_000);
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id, "a@b.c").expect("issue");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "a@b.c");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let good = make_keys("a-unit-test-secret-of-enough-length", 60_000);
        let evil = make_keys("another-secret-entirely-goes-here!!", 60_000);
        let token = good.issue(Uuid::new_v4(), "a@b.c").expect("issue");
        assert_eq!(evil.verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = make_keys("a-unit-test-secret-of-enough-length", 60_000);
        assert_eq!(keys.verify("not.a.jwt"), Err(TokenError::Malformed));
        assert_eq!(keys.verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn verify_rejects_expired_token() {
        // jsonwebtoken applies 60s leeway by default, so back-date well past it
        let keys = make_keys("a-unit-test-secret-of-enough-length", -120_000);
        let token = keys.issue(Uuid::new_v4(), "a@b.c").expect("issue");
        assert_eq!(keys.verify(&token), Err(TokenError::Expired));
    }
}
