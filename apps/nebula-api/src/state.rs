//! Application state - shared across all handlers.

use std::sync::Arc;

use nebula_core::ports::{
    AdminGate, AuthError, ContentAssistant, KeyValueStore, KvError, PostStore, SessionStore,
};
use nebula_infra::{
    Argon2AdminGate, FileKeyValueStore, InMemoryKeyValueStore, InMemoryPostStore,
    KeyValueSessionStore, LocalPostStore,
};

use crate::config::{AppConfig, KvBackend, StoreBackend};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub gate: Arc<dyn AdminGate>,
    /// `None` when no Gemini key is configured.
    pub assistant: Option<Arc<dyn ContentAssistant>>,
}

/// Failures while wiring backends at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Key-value backend unavailable: {0}")]
    KeyValue(#[from] KvError),

    #[error("Database unavailable: {0}")]
    Database(String),

    #[error("Admin gate setup failed: {0}")]
    Auth(#[from] AuthError),

    #[error("{0} support was not compiled in")]
    FeatureDisabled(&'static str),
}

impl AppState {
    pub fn new(
        posts: Arc<dyn PostStore>,
        sessions: Arc<dyn SessionStore>,
        gate: Arc<dyn AdminGate>,
        assistant: Option<Arc<dyn ContentAssistant>>,
    ) -> Self {
        Self {
            posts,
            sessions,
            gate,
            assistant,
        }
    }

    /// Build the application state with the backends selected in `config`.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let kv = key_value_store(config).await?;
        let posts = post_store(config, kv.clone()).await?;
        let sessions: Arc<dyn SessionStore> =
            Arc::new(KeyValueSessionStore::new(kv, config.session_ttl));

        let gate = Argon2AdminGate::new(config.admin_password.as_deref())?;

        let state = Self::new(posts, sessions, Arc::new(gate), assistant());
        tracing::info!(
            store = state.posts.backend(),
            assistant = state.assistant.is_some(),
            "Application state initialized"
        );
        Ok(state)
    }
}

async fn key_value_store(config: &AppConfig) -> Result<Arc<dyn KeyValueStore>, StartupError> {
    match config.kv {
        KvBackend::Memory => Ok(Arc::new(InMemoryKeyValueStore::new())),
        KvBackend::File => {
            let kv = FileKeyValueStore::open(&config.data_dir).await?;
            tracing::info!(dir = %config.data_dir.display(), "Using file key-value store");
            Ok(Arc::new(kv))
        }
        #[cfg(feature = "redis")]
        KvBackend::Redis => {
            let redis_config = nebula_infra::RedisConfig {
                url: config.redis_url.clone().unwrap_or_default(),
                ..Default::default()
            };
            let kv = nebula_infra::RedisKeyValueStore::new(&redis_config).await?;
            Ok(Arc::new(kv))
        }
        #[cfg(not(feature = "redis"))]
        KvBackend::Redis => Err(StartupError::FeatureDisabled("Redis")),
    }
}

async fn post_store(
    config: &AppConfig,
    kv: Arc<dyn KeyValueStore>,
) -> Result<Arc<dyn PostStore>, StartupError> {
    match config.store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory post store. Posts are lost on restart.");
            Ok(Arc::new(InMemoryPostStore::new()))
        }
        StoreBackend::Local => Ok(Arc::new(LocalPostStore::new(kv))),
        #[cfg(feature = "postgres")]
        StoreBackend::Postgres => {
            let settings = config
                .database
                .as_ref()
                .ok_or_else(|| StartupError::Database("DATABASE_URL not set".to_string()))?;
            let db_config = nebula_infra::DatabaseConfig {
                url: settings.url.clone(),
                max_connections: settings.max_connections,
                min_connections: settings.min_connections,
            };
            let conn = nebula_infra::database::connect(&db_config)
                .await
                .map_err(|e| StartupError::Database(e.to_string()))?;
            Ok(Arc::new(nebula_infra::PostgresPostStore::new(conn)))
        }
        #[cfg(not(feature = "postgres"))]
        StoreBackend::Postgres => Err(StartupError::FeatureDisabled("Postgres")),
    }
}

#[cfg(feature = "assistant")]
fn assistant() -> Option<Arc<dyn ContentAssistant>> {
    let config = nebula_infra::GeminiConfig::from_env()?;
    match nebula_infra::GeminiAssistant::new(config) {
        Ok(assistant) => Some(Arc::new(assistant)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build Gemini client. AI features disabled.");
            None
        }
    }
}

#[cfg(not(feature = "assistant"))]
fn assistant() -> Option<Arc<dyn ContentAssistant>> {
    None
}
