//! Current-user info endpoint

use actix_web::{web, HttpResponse};

use sg_core::errors::{AuthError, DomainError};

use crate::app::AppState;
use crate::handlers::error::handle_domain_error;
use crate::middleware::AuthContext;

/// Handle GET /api/auth/info
///
/// Returns the attributes of the authenticated user, looked up through
/// the store registered for the token's guard.
pub async fn info(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    let store = match state.users.resolve(&auth.claims.iss) {
        Ok(store) => store,
        Err(e) => return handle_domain_error(&e),
    };

    match store.find_by_identity(&auth.identity).await {
        Ok(Some(user)) => HttpResponse::Ok().json(user),
        Ok(None) => handle_domain_error(&DomainError::Auth(AuthError::UserNotFound)),
        Err(e) => handle_domain_error(&e),
    }
}
