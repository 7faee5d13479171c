//! Directory-backed key-value store: one JSON file per key.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use nebula_core::domain::now_millis;
use nebula_core::ports::{KeyValueStore, KvError};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredValue {
    value: String,
    expires_at: Option<i64>,
}

/// Persists each key as `<dir>/<key>.json`, replacing files atomically via rename.
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create the store, creating `dir` if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, KvError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| KvError::Connection(format!("{}: {}", dir.display(), e)))?;

        tracing::info!(dir = %dir.display(), "File key-value store ready");
        Ok(Self { dir })
    }

    /// Keys are percent-encoded, so distinct keys never share a file.
    fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                name.push(byte as char);
            } else {
                name.push_str(&format!("%{:02X}", byte));
            }
        }
        self.dir.join(format!("{}.json", name))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let path = self.path_for(key);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(KvError::Operation(format!("{}: {}", path.display(), e))),
        };

        let stored: StoredValue =
            serde_json::from_str(&raw).map_err(|e| KvError::Serialization(e.to_string()))?;

        if stored.expires_at.is_some_and(|exp| now_millis() > exp) {
            self.delete(key).await?;
            return Ok(None);
        }

        Ok(Some(stored.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), KvError> {
        let stored = StoredValue {
            value: value.to_string(),
            expires_at: ttl.map(|d| now_millis() + d.as_millis() as i64),
        };
        let body =
            serde_json::to_vec(&stored).map_err(|e| KvError::Serialization(e.to_string()))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| KvError::Operation(format!("{}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| KvError::Operation(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(key = %key, "Key written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(KvError::Operation(format!("{}: {}", path.display(), e))),
        }
    }
}
