use async_trait::async_trait;
use std::time::Duration;

/// String key-value storage (in-memory, file directory, Redis).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get a value. Expired entries read as absent.
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Set a value with optional TTL.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), KvError>;

    /// Delete a key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), KvError>;

    /// Check if a key exists.
    async fn exists(&self, key: &str) -> Result<bool, KvError> {
        Ok(self.get(key).await?.is_some())
    }
}

/// Key-value operation errors.
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
