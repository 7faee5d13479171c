//! In-process post stores.

mod local;
mod memory;

#[cfg(test)]
pub(crate) mod contract;

pub use local::{LOCAL_POSTS_KEY, LocalPostStore};
pub use memory::InMemoryPostStore;
