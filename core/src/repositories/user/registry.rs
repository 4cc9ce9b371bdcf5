//! Issuer-to-user-store registry.

use std::collections::HashMap;
use std::sync::Arc;

use super::r#trait::UserStore;
use crate::errors::{AuthError, DomainError};

/// Maps an issuer (guard name) to the user store backing that realm
///
/// Adding an authentication realm means registering a store under its
/// guard name; nothing dispatches on issuer names anywhere else.
#[derive(Default)]
pub struct UserStoreRegistry {
    stores: HashMap<String, Arc<dyn UserStore>>,
}

impl UserStoreRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            stores: HashMap::new(),
        }
    }

    /// Register a user store under a guard name
    pub fn register(mut self, guard: impl Into<String>, store: Arc<dyn UserStore>) -> Self {
        self.stores.insert(guard.into(), store);
        self
    }

    /// Resolve the user store for a guard name
    ///
    /// # Returns
    /// * `Ok(store)` - A store is registered for this guard
    /// * `Err(DomainError)` - No such guard
    pub fn resolve(&self, guard: &str) -> Result<&Arc<dyn UserStore>, DomainError> {
        self.stores.get(guard).ok_or_else(|| {
            DomainError::Auth(AuthError::UnknownGuard {
                guard: guard.to_string(),
            })
        })
    }
}
