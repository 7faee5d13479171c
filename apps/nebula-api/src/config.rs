//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Where posts are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Local,
    Postgres,
}

/// Key-value backend for the local store and admin sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvBackend {
    Memory,
    File,
    Redis,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: expected one of {expected}")]
    InvalidChoice {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{0} must be set for the selected backend")]
    Missing(&'static str),
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "local" => Ok(Self::Local),
            "postgres" => Ok(Self::Postgres),
            _ => Err(ConfigError::InvalidChoice {
                key: "STORE_BACKEND",
                value: s.to_string(),
                expected: "memory, local, postgres",
            }),
        }
    }
}

impl FromStr for KvBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "redis" => Ok(Self::Redis),
            _ => Err(ConfigError::InvalidChoice {
                key: "KV_BACKEND",
                value: s.to_string(),
                expected: "memory, file, redis",
            }),
        }
    }
}

/// Postgres connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Prefix in front of `/api`, e.g. `/blog`. Empty by default.
    pub base_path: String,
    pub store: StoreBackend,
    pub kv: KvBackend,
    pub data_dir: PathBuf,
    pub database: Option<DatabaseSettings>,
    pub redis_url: Option<String>,
    pub admin_password: Option<String>,
    pub session_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_path: String::new(),
            store: StoreBackend::Memory,
            kv: KvBackend::Memory,
            data_dir: PathBuf::from("./data"),
            database: None,
            redis_url: None,
            admin_password: None,
            session_ttl: Duration::from_secs(86_400),
        }
    }
}

fn parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let store = match env::var("STORE_BACKEND") {
            Ok(v) => v.parse()?,
            Err(_) => StoreBackend::Memory,
        };

        // The local store needs something durable unless told otherwise.
        let kv = match env::var("KV_BACKEND") {
            Ok(v) => v.parse()?,
            Err(_) if store == StoreBackend::Local => KvBackend::File,
            Err(_) => KvBackend::Memory,
        };

        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseSettings {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS", 20),
            min_connections: parsed("DB_MIN_CONNECTIONS", 2),
        });
        if store == StoreBackend::Postgres && database.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let redis_url = env::var("REDIS_URL").ok();
        if kv == KvBackend::Redis && redis_url.is_none() {
            return Err(ConfigError::Missing("REDIS_URL"));
        }

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parsed("PORT", defaults.port),
            base_path: normalize_base_path(&env::var("BASE_PATH").unwrap_or_default()),
            store,
            kv,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            database,
            redis_url,
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty()),
            session_ttl: Duration::from_secs(parsed(
                "SESSION_TTL_SECS",
                defaults.session_ttl.as_secs(),
            )),
        })
    }
}

/// `blog/` -> `/blog`, `/` -> ``.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
