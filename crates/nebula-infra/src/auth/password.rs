//! Shared admin secret verified with Argon2.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use nebula_core::ports::{AdminGate, AuthError};

/// Holds an Argon2 hash of the configured admin password, never the plain text.
pub struct Argon2AdminGate {
    argon2: Argon2<'static>,
    secret_hash: Option<String>,
}

impl Argon2AdminGate {
    /// Hash the secret once. `None` or an empty secret leaves the gate unconfigured.
    pub fn new(secret: Option<&str>) -> Result<Self, AuthError> {
        let argon2 = Argon2::default();

        let secret_hash = match secret.filter(|s| !s.is_empty()) {
            Some(secret) => {
                let salt = SaltString::generate(&mut OsRng);
                let hash = argon2
                    .hash_password(secret.as_bytes(), &salt)
                    .map_err(|e| AuthError::HashingError(e.to_string()))?;
                Some(hash.to_string())
            }
            None => {
                tracing::warn!("ADMIN_PASSWORD not set - admin login is disabled");
                None
            }
        };

        Ok(Self {
            argon2,
            secret_hash,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.secret_hash.is_some()
    }
}

impl AdminGate for Argon2AdminGate {
    fn verify(&self, password: &str) -> Result<bool, AuthError> {
        let hash = self.secret_hash.as_deref().ok_or(AuthError::NotConfigured)?;
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
