//! Distributed refresh lock built on the shared cache.

use chrono::Duration;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::repositories::cache::CacheStore;

const LOCK_KEY_PREFIX: &str = "refresh_lock:";

/// Advisory, self-expiring lock serializing refresh attempts per token
///
/// Keyed by the token's `jti`: every request contending for a refresh in
/// the same window carries the same token, and a freshly issued
/// replacement can never be blocked by a stale lock for the same identity.
/// The lease bounds the worst case if a holder dies before releasing.
pub struct RefreshLock {
    cache: Arc<dyn CacheStore>,
}

impl RefreshLock {
    /// Creates a refresh lock over the shared cache
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache }
    }

    /// Attempts to take the lock for a token id
    ///
    /// Cache unavailability reads as "not acquired": the refresh is
    /// skipped for this request and retried on a later one near expiry.
    /// The lease is clamped to at least one second; the cache's SET EX
    /// rejects zero.
    pub async fn try_acquire(&self, token_id: &str, lease: Duration) -> bool {
        let lease_secs = lease.num_seconds().max(1) as u64;
        let holder = Uuid::new_v4().to_string();

        match self
            .cache
            .set_if_absent(
                &Self::key(token_id),
                &holder,
                std::time::Duration::from_secs(lease_secs),
            )
            .await
        {
            Ok(held) => held,
            Err(e) => {
                warn!("refresh lock acquisition failed, skipping refresh: {e}");
                false
            }
        }
    }

    /// Releases the lock for a token id
    ///
    /// Idempotent: releasing an already released or expired lock is a
    /// no-op. A failed release is only logged; the lease expiry reclaims
    /// the lock regardless.
    pub async fn release(&self, token_id: &str) {
        if let Err(e) = self.cache.delete(&Self::key(token_id)).await {
            warn!("refresh lock release failed, lease expiry will reclaim it: {e}");
        }
    }

    fn key(token_id: &str) -> String {
        format!("{}{}", LOCK_KEY_PREFIX, token_id)
    }
}
