//! Admin authentication port.

/// Shared-secret check guarding the admin surface.
pub trait AdminGate: Send + Sync {
    /// Returns `Ok(false)` for a wrong password and
    /// `Err(AuthError::NotConfigured)` when no secret is set.
    fn verify(&self, password: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Admin password is not configured")]
    NotConfigured,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
