//! User store traits defining the interface to the external user store.
//!
//! The relational user store is an external collaborator: given an
//! identity it returns user attributes or nothing. It is consulted only
//! during issuance (login) and refresh, never on the plain validation path.

use async_trait::async_trait;

use crate::domain::entities::user::UserAttributes;
use crate::errors::DomainError;

/// Lookup interface to the external user store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by their opaque identity
    ///
    /// # Returns
    /// * `Ok(Some(UserAttributes))` - User found
    /// * `Ok(None)` - No user with this identity
    /// * `Err(DomainError)` - The store could not be reached
    async fn find_by_identity(&self, identity: &str) -> Result<Option<UserAttributes>, DomainError>;
}

/// One-way credential verification against the user store
///
/// The hashing scheme is opaque to the caller; implementations verify a
/// login/password pair and return the matching user's attributes.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verify a login/password pair
    ///
    /// # Returns
    /// * `Ok(Some(UserAttributes))` - Credentials match this user
    /// * `Ok(None)` - Unknown login or wrong password
    /// * `Err(DomainError)` - The store could not be reached
    async fn verify(&self, login: &str, password: &str) -> Result<Option<UserAttributes>, DomainError>;
}
