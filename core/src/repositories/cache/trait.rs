//! Cache store trait defining the shared key-value capability.

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::DomainError;

/// Key-value store with per-key TTL
///
/// Both the revocation list and the refresh lock are built on this single
/// capability. Calls are network round-trips to a shared cache;
/// implementations must bound every call with a timeout and surface
/// timeouts as errors, so callers can apply their fail-open policies.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Atomically create `key` if absent, with a time-to-live
    ///
    /// # Returns
    /// * `Ok(true)` - The key was created
    /// * `Ok(false)` - The key already exists and has not expired
    /// * `Err(DomainError)` - The cache could not be reached
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool, DomainError>;

    /// Look up a key
    ///
    /// # Returns
    /// * `Ok(Some(value))` - The key exists
    /// * `Ok(None)` - The key is absent or expired
    /// * `Err(DomainError)` - The cache could not be reached
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Delete a key
    ///
    /// Deleting an absent key is a no-op, never an error.
    ///
    /// # Returns
    /// * `Ok(true)` - The key existed and was deleted
    /// * `Ok(false)` - The key was not present
    /// * `Err(DomainError)` - The cache could not be reached
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;
}
