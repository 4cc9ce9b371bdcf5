//! Cache-backed token revocation list ("blacklist").

use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::warn;

use crate::errors::DomainError;
use crate::repositories::cache::CacheStore;

const BLACKLIST_KEY_PREFIX: &str = "jwt_blacklist:";

/// Records which tokens have been revoked before their natural expiry
///
/// Entries are keyed by a SHA-256 fingerprint of the raw token string and
/// expire with the token's own remaining lifetime, so the list never holds
/// more than "tokens issued but not yet naturally expired".
///
/// Lookups fail open: if the cache cannot be reached, a token reads as not
/// revoked. Availability is favored over strict revocation; a revoked token
/// stays usable until the cache recovers or the token expires on its own.
pub struct RevocationList {
    cache: Arc<dyn CacheStore>,
    grace: Duration,
}

impl RevocationList {
    /// Creates a revocation list over the shared cache
    ///
    /// `grace` is the blacklist grace period: entries younger than it read
    /// as "not revoked", smoothing concurrent requests that raced a
    /// refresh. Zero disables the window.
    pub fn new(cache: Arc<dyn CacheStore>, grace: Duration) -> Self {
        Self { cache, grace }
    }

    /// Revokes a token for the rest of its lifetime
    ///
    /// Insertion is set-if-absent so a racing second revocation never
    /// overwrites the earlier revocation timestamp. Revoking an already
    /// expired token is a no-op: the entry must never outlive the token.
    pub async fn revoke(&self, raw_token: &str, remaining: Duration) -> Result<(), DomainError> {
        let remaining_secs = remaining.num_seconds();
        if remaining_secs <= 0 {
            return Ok(());
        }

        let revoked_at = Utc::now().timestamp().to_string();
        self.cache
            .set_if_absent(
                &Self::key(raw_token),
                &revoked_at,
                std::time::Duration::from_secs(remaining_secs as u64),
            )
            .await?;

        Ok(())
    }

    /// Whether a token is currently blocked by the blacklist
    ///
    /// Returns false on cache miss, cache failure, an unparseable entry,
    /// or an entry still inside the grace window.
    pub async fn is_revoked(&self, raw_token: &str) -> bool {
        let revoked_at = match self.cache.get(&Self::key(raw_token)).await {
            Ok(Some(value)) => value,
            Ok(None) => return false,
            Err(e) => {
                warn!("blacklist lookup failed, treating token as not revoked: {e}");
                return false;
            }
        };

        let revoked_at: i64 = match revoked_at.parse() {
            Ok(ts) => ts,
            Err(_) => return false,
        };

        Utc::now().timestamp() - revoked_at >= self.grace.num_seconds()
    }

    /// Exact membership check, ignoring the grace window
    ///
    /// Used inside the refresh critical section to detect a completed
    /// refresh that the grace window would otherwise hide.
    pub async fn contains(&self, raw_token: &str) -> bool {
        match self.cache.get(&Self::key(raw_token)).await {
            Ok(Some(_)) => true,
            Ok(None) => false,
            Err(e) => {
                warn!("blacklist membership check failed: {e}");
                false
            }
        }
    }

    fn key(raw_token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw_token.as_bytes());
        format!("{}{}", BLACKLIST_KEY_PREFIX, hex::encode(hasher.finalize()))
    }
}
