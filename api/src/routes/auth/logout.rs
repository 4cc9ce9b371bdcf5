//! Logout endpoint

use actix_web::{web, HttpResponse};
use tracing::info;

use crate::app::AppState;
use crate::dto::auth::LogoutResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::AuthContext;

/// Handle POST /api/auth/logout
///
/// Revokes the presented token for the rest of its lifetime. Idempotent:
/// logging out twice with the same token succeeds both times.
pub async fn logout(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.tokens.logout(&auth.raw_token, &auth.claims).await {
        Ok(()) => {
            info!(identity = %auth.identity, jti = %auth.claims.jti, "logged out");
            HttpResponse::Ok().json(LogoutResponse::ok())
        }
        Err(e) => handle_domain_error(&e),
    }
}
