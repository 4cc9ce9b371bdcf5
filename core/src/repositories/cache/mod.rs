//! Shared cache port

mod mock;
#[allow(clippy::module_inception)]
mod r#trait;

pub use mock::MemoryCache;
pub use r#trait::CacheStore;
