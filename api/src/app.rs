//! Application state shared by handlers and middleware.

use std::sync::Arc;

use sg_core::repositories::user::{CredentialVerifier, UserStoreRegistry};
use sg_core::services::token::TokenService;

/// The single guard (issuer) name this application serves
pub const APP_GUARD: &str = "app";

/// Shared application state
///
/// Injected through actix `web::Data`; the auth guard pulls the token
/// service from here, handlers use all three collaborators.
pub struct AppState {
    /// Token issuance, validation, revocation and refresh
    pub tokens: Arc<TokenService>,
    /// Issuer-to-user-store registry
    pub users: Arc<UserStoreRegistry>,
    /// Credential verification for login
    pub credentials: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(
        tokens: Arc<TokenService>,
        users: Arc<UserStoreRegistry>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            tokens,
            users,
            credentials,
        }
    }
}
