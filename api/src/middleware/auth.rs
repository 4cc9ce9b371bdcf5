//! Authentication guard middleware.
//!
//! Extracts the bearer token from the `Authorization` header, validates it
//! through the token service and places an [`AuthContext`] into the request
//! extensions for handlers. Any failure short-circuits the request with the
//! generic unauthorized response; the concrete reason is only logged.
//!
//! When the validated token is inside its refresh grace period, a
//! replacement is minted best-effort and surfaced to the client via the
//! `new-token` and `new-expires-in` response headers. The current request
//! is authorized by the original token either way.

use std::future::{ready, Ready};
use std::pin::Pin;
use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use sg_core::domain::entities::token::{Claims, TokenOutput};
use sg_core::errors::TokenError;

use crate::app::AppState;
use crate::handlers::error::unauthorized;

const NEW_TOKEN_HEADER: &str = "new-token";
const NEW_EXPIRES_IN_HEADER: &str = "new-expires-in";

/// Authenticated request context stored in request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The authenticated identity (`sub` claim)
    pub identity: String,
    /// The full validated claims
    pub claims: Claims,
    /// The raw bearer token the request presented
    pub raw_token: String,
}

impl AuthContext {
    fn new(claims: Claims, raw_token: String) -> Self {
        Self {
            identity: claims.sub.clone(),
            claims,
            raw_token,
        }
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthContext>() {
            Some(ctx) => ready(Ok(ctx.clone())),
            None => ready(Err(unauthorized())),
        }
    }
}

/// Optional authentication context for routes usable with or without a token
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalAuth(req.extensions().get::<AuthContext>().cloned())))
    }
}

/// Guard middleware factory, bound to one guard (issuer) name
pub struct AuthGuard {
    guard: Rc<String>,
}

impl AuthGuard {
    /// Create a guard for the given guard name
    pub fn new(guard: impl Into<String>) -> Self {
        Self {
            guard: Rc::new(guard.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthGuardMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardMiddleware {
            service: Rc::new(service),
            guard: Rc::clone(&self.guard),
        }))
    }
}

pub struct AuthGuardMiddleware<S> {
    service: Rc<S>,
    guard: Rc<String>,
}

impl<S, B> Service<ServiceRequest> for AuthGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let guard = Rc::clone(&self.guard);

        Box::pin(async move {
            let Some(token) = extract_bearer_token(&req) else {
                debug!("request rejected: {}", TokenError::MissingCredential);
                return Err(unauthorized());
            };

            let Some(state) = req.app_data::<web::Data<AppState>>() else {
                warn!("token service not configured in app data");
                return Err(unauthorized());
            };

            let claims = match state.tokens.validate(&token, &guard).await {
                Ok(claims) => claims,
                Err(e) => {
                    warn!(guard = %guard, "token rejected: {e}");
                    return Err(unauthorized());
                }
            };

            // Best effort; never affects this request's outcome.
            let refreshed = state.tokens.maybe_refresh(&token, &claims, &guard).await;

            req.extensions_mut().insert(AuthContext::new(claims, token));

            let mut res = service.call(req).await?;

            if let Some(replacement) = refreshed {
                append_refresh_headers(res.headers_mut(), &replacement);
            }

            Ok(res)
        })
    }
}

/// Extract a bearer token from the `Authorization` header
///
/// The scheme comparison is case-insensitive; surrounding whitespace is
/// trimmed. An empty token reads as absent.
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;

    let rest = header
        .get(..7)
        .filter(|prefix| prefix.eq_ignore_ascii_case("bearer "))
        .map(|_| &header[7..])?;

    let token = rest.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn append_refresh_headers(headers: &mut actix_web::http::header::HeaderMap, output: &TokenOutput) {
    match HeaderValue::from_str(&output.access_token) {
        Ok(value) => {
            headers.insert(HeaderName::from_static(NEW_TOKEN_HEADER), value);
        }
        Err(e) => {
            warn!("replacement token not header-safe, dropping: {e}");
            return;
        }
    }

    if let Ok(value) = HeaderValue::from_str(&output.expires_in.to_string()) {
        headers.insert(HeaderName::from_static(NEW_EXPIRES_IN_HEADER), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn request_with_auth(value: &str) -> ServiceRequest {
        TestRequest::default()
            .insert_header(("Authorization", value))
            .to_srv_request()
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = request_with_auth("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_bearer_token_case_insensitive() {
        let req = request_with_auth("bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_bearer_token_trims_whitespace() {
        let req = request_with_auth("Bearer   abc.def.ghi  ");
        assert_eq!(extract_bearer_token(&req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_rejects_other_schemes() {
        let req = request_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(extract_bearer_token(&req), None);
    }

    #[test]
    fn test_extract_rejects_empty_token() {
        let req = request_with_auth("Bearer   ");
        assert_eq!(extract_bearer_token(&req), None);
    }

    #[test]
    fn test_extract_missing_header() {
        let req = TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req), None);
    }
}
