//! Key-value backends for the local blob store and admin sessions.

mod file;
mod memory;

#[cfg(feature = "redis")]
mod redis;

pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;

#[cfg(feature = "redis")]
pub use self::redis::{RedisConfig, RedisKeyValueStore};
