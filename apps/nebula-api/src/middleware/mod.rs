//! Middleware modules.

pub mod auth;
pub mod error;

pub use auth::{AdminSession, OptionalAdminSession};
pub use error::{AppError, AppResult};
