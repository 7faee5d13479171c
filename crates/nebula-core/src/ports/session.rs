//! Admin session port.

use async_trait::async_trait;
use std::time::Duration;

/// An open admin session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub ttl: Duration,
}

/// Server-side session registry. Login opens, logout closes, the TTL expires.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn open(&self) -> Result<Session, SessionError>;

    async fn is_active(&self, token: &str) -> Result<bool, SessionError>;

    async fn close(&self, token: &str) -> Result<(), SessionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session backend error: {0}")]
    Backend(String),
}
