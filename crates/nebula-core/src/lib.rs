//! # Nebula Core
//!
//! The domain layer of the Nebula blog.
//! Entities, validated inputs and the ports that storage, auth and the
//! content assistant must implement. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
