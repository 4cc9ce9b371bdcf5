//! Error-to-response mapping.
//!
//! Every authentication rejection collapses into one generic 401 body so
//! validation internals never leak to clients; the concrete reason is
//! logged server-side.

use actix_web::HttpResponse;
use tracing::{error, warn};

use sg_core::errors::DomainError;
use sg_shared::types::response::ErrorResponse;

/// Map a domain error to an HTTP response
pub fn handle_domain_error(err: &DomainError) -> HttpResponse {
    if err.is_rejection() {
        warn!("request rejected: {err}");
        HttpResponse::Unauthorized().json(ErrorResponse::unauthorized())
    } else {
        error!("internal error: {err}");
        HttpResponse::InternalServerError()
            .json(ErrorResponse::new("INTERNAL_ERROR", "Internal server error"))
    }
}

/// An actix error carrying the generic unauthorized response
pub fn unauthorized() -> actix_web::Error {
    actix_web::error::InternalError::from_response(
        "unauthorized",
        HttpResponse::Unauthorized().json(ErrorResponse::unauthorized()),
    )
    .into()
}
