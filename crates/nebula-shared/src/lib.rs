//! # Nebula Shared
//!
//! Wire types shared by the API server and its HTTP clients.

pub mod dto;
pub mod response;

pub use response::ApiResponse;
