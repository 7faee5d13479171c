//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod assistant;
mod auth;
mod kv;
mod repository;
mod session;

pub use assistant::{AssistError, ContentAssistant, TitleSuggestion};
pub use auth::{AdminGate, AuthError};
pub use kv::{KeyValueStore, KvError};
pub use repository::PostStore;
pub use session::{Session, SessionError, SessionStore};
