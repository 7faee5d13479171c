//! # Nebula API
//!
//! Actix-web server for the Nebula blog: posts, comments, likes, an admin
//! session gate and optional AI writing helpers.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use state::AppState;
