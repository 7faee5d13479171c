//! # Nebula Infrastructure
//!
//! Concrete implementations of the ports defined in `nebula-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory and file-backed storage only
//! - `postgres` - PostgreSQL post store via SeaORM
//! - `auth` - Argon2 admin gate
//! - `redis` - Redis key-value backend for the local store and sessions
//! - `remote` - HTTP client implementing the post store against a Nebula API
//! - `assistant` - Gemini content assistant

pub mod kv;
pub mod session;
pub mod store;

#[cfg(feature = "postgres")]
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "remote")]
pub mod remote;

#[cfg(feature = "assistant")]
pub mod assistant;

// Re-exports - always available
pub use kv::{FileKeyValueStore, InMemoryKeyValueStore};
pub use session::KeyValueSessionStore;
pub use store::{InMemoryPostStore, LOCAL_POSTS_KEY, LocalPostStore};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresPostStore};

#[cfg(feature = "auth")]
pub use auth::Argon2AdminGate;

#[cfg(feature = "redis")]
pub use kv::{RedisConfig, RedisKeyValueStore};

#[cfg(feature = "remote")]
pub use remote::{HttpPostStore, RemoteConfig};

#[cfg(feature = "assistant")]
pub use assistant::{GeminiAssistant, GeminiConfig};
