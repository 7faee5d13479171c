//! Admin sessions kept in a key-value store with a TTL.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use nebula_core::ports::{KeyValueStore, Session, SessionError, SessionStore};

const SESSION_PREFIX: &str = "session:";

/// Session registry backed by any [`KeyValueStore`].
pub struct KeyValueSessionStore {
    kv: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl KeyValueSessionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self { kv, ttl }
    }

    fn key(token: &str) -> String {
        format!("{}{}", SESSION_PREFIX, token)
    }
}

#[async_trait]
impl SessionStore for KeyValueSessionStore {
    async fn open(&self) -> Result<Session, SessionError> {
        let token = Uuid::new_v4().simple().to_string();
        self.kv
            .set(&Self::key(&token), "admin", Some(self.ttl))
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))?;

        tracing::info!(ttl_secs = self.ttl.as_secs(), "Admin session opened");
        Ok(Session {
            token,
            ttl: self.ttl,
        })
    }

    async fn is_active(&self, token: &str) -> Result<bool, SessionError> {
        if token.is_empty() {
            return Ok(false);
        }
        self.kv
            .exists(&Self::key(token))
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))
    }

    async fn close(&self, token: &str) -> Result<(), SessionError> {
        self.kv
            .delete(&Self::key(token))
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))?;
        tracing::info!("Admin session closed");
        Ok(())
    }
}
