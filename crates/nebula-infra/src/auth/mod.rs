//! Admin gate implementations.

mod password;

pub use password::Argon2AdminGate;
