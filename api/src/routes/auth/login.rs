//! Login endpoint

use actix_web::{web, HttpResponse};
use tracing::info;

use sg_core::errors::{AuthError, DomainError};

use crate::app::{AppState, APP_GUARD};
use crate::dto::auth::LoginRequest;
use crate::handlers::error::handle_domain_error;

/// Handle POST /api/auth/login
///
/// Verifies the credentials and issues a signed token. Unknown logins and
/// wrong passwords get the same generic response.
pub async fn login(state: web::Data<AppState>, payload: web::Json<LoginRequest>) -> HttpResponse {
    let user = match state.credentials.verify(&payload.login, &payload.password).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return handle_domain_error(&DomainError::Auth(AuthError::AuthenticationFailed));
        }
        Err(e) => return handle_domain_error(&e),
    };

    match state.tokens.issue(&user.identity, APP_GUARD) {
        Ok((output, claims)) => {
            info!(identity = %user.identity, jti = %claims.jti, "login succeeded");
            HttpResponse::Ok().json(output)
        }
        Err(e) => handle_domain_error(&e),
    }
}
