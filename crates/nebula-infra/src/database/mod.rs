//! PostgreSQL post store.

mod connections;
pub mod entity;
mod postgres_store;

pub use connections::{DatabaseConfig, connect};
pub use postgres_store::PostgresPostStore;

#[cfg(test)]
mod tests;
