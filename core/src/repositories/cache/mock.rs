//! In-memory implementation of `CacheStore` for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::r#trait::CacheStore;
use crate::errors::DomainError;

#[derive(Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// In-memory cache with TTL bookkeeping
///
/// Used in unit and integration tests in place of Redis. `set_if_absent`
/// is atomic under the write lock, matching the atomicity the real cache
/// provides. `set_available(false)` simulates an outage: every operation
/// fails until availability is restored.
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    available: AtomicBool,
}

impl MemoryCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate cache availability; when false, every call errors
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of live (non-expired) entries
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.values().filter(|e| !e.is_expired()).count()
    }

    /// Whether the cache holds no live entries
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::Cache {
                message: "cache unavailable".to_string(),
            })
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;

        match entries.get(key) {
            Some(existing) if !existing.is_expired() => Ok(false),
            _ => {
                let expires_at = (!ttl.is_zero()).then(|| Instant::now() + ttl);
                entries.insert(
                    key.to_string(),
                    Entry {
                        value: value.to_string(),
                        expires_at,
                    },
                );
                Ok(true)
            }
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.check_available()?;
        let entries = self.entries.read().await;

        Ok(entries
            .get(key)
            .filter(|e| !e.is_expired())
            .map(|e| e.value.clone()))
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;

        match entries.remove(key) {
            Some(entry) => Ok(!entry.is_expired()),
            None => Ok(false),
        }
    }
}
