use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::config::HasherConfig;

/// Argon2id hasher with the configured work factor. The PHC string embeds
/// salt and parameters, so raising the cost later leaves old hashes
/// verifiable as-is.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new(cfg: &HasherConfig) -> anyhow::Result<Self> {
        let params = Params::new(cfg.memory_kib, cfg.iterations, Params::DEFAULT_P_COST, None)
            .map_err(|e| anyhow::anyhow!("invalid argon2 params: {e}"))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn hash(&self, plain: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                anyhow::anyhow!(e.to_string())
            })?
            .to_string();
        Ok(hash)
    }

    pub fn verify(&self, plain: &str, stored: &str) -> anyhow::Result<bool> {
        let parsed = PasswordHash::new(stored).map_err(|e| {
            error!(error = %e, "argon2 parse hash error");
            anyhow::anyhow!(e.to_string())
        })?;
        Ok(self.argon2.verify_password(plain.as_bytes(), &parsed).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_hasher() -> PasswordHasher {
        PasswordHasher::new(&HasherConfig {
            memory_kib: 1024,
            iterations: 1,
        })
        .expect("params ok")
    }

    #[test]
    fn hash_and_verify_roundtrip() {
        let hasher = test_hasher();
        let password = "Pa$$w0rd!";
        let hash = hasher.hash(password).expect("hashing should succeed");
        assert_ne!(hash, password);
        assert!(hasher.verify(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hasher = test_hasher();
        let hash = hasher.hash("correct-horse-battery-staple").expect("hash");
        assert!(!hasher.verify("wrong-password", &hash).expect("verify"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let hasher = test_hasher();
        assert!(hasher.verify("anything", "not-a-valid-hash").is_err());
    }

    #[test]
    fn old_hashes_survive_a_cost_raise() {
        let low = test_hasher();
        let hash = low.hash("stable-password").expect("hash");
        let raised = PasswordHasher::new(&HasherConfig {
            memory_kib: 2048,
            iterations: 2,
        })
        .expect("params ok");
        assert!(raised.verify("stable-password", &hash).expect("verify"));
    }
}
