//! Mock implementation of the user store for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::r#trait::{CredentialVerifier, UserStore};
use crate::domain::entities::user::UserAttributes;
use crate::errors::DomainError;

/// Mock user store for testing
///
/// Holds users keyed by identity; passwords are compared in plain text.
/// `set_available(false)` makes every lookup fail, to exercise the
/// fail-open paths around user-store outages.
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<String, (UserAttributes, Option<String>)>>>,
    available: AtomicBool,
}

impl MockUserStore {
    /// Create an empty mock store
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            available: AtomicBool::new(true),
        }
    }

    /// Insert a user without credentials
    pub async fn insert(&self, user: UserAttributes) {
        let mut users = self.users.write().await;
        users.insert(user.identity.clone(), (user, None));
    }

    /// Insert a user with a password usable through `CredentialVerifier`
    pub async fn insert_with_password(&self, user: UserAttributes, password: impl Into<String>) {
        let mut users = self.users.write().await;
        users.insert(user.identity.clone(), (user, Some(password.into())));
    }

    /// Simulate store availability; when false, every call errors
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::Internal {
                message: "user store unavailable".to_string(),
            })
        }
    }
}

impl Default for MockUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn find_by_identity(&self, identity: &str) -> Result<Option<UserAttributes>, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.get(identity).map(|(user, _)| user.clone()))
    }
}

#[async_trait]
impl CredentialVerifier for MockUserStore {
    async fn verify(&self, login: &str, password: &str) -> Result<Option<UserAttributes>, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;

        Ok(users
            .get(login)
            .filter(|(_, stored)| stored.as_deref() == Some(password))
            .map(|(user, _)| user.clone()))
    }
}
