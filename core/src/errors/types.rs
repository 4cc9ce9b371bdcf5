//! Domain-specific error types for authentication and token management
//!
//! Every rejection here surfaces to the end client as a generic
//! "unauthorized" response; the concrete variant exists for internal
//! logging and tests only, so validation internals never leak.

use thiserror::Error;

/// Token validation and management errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token not yet valid")]
    NotYetValid,

    #[error("Token issuer mismatch: expected {expected}, got {actual}")]
    IssuerMismatch { expected: String, actual: String },

    #[error("Token revoked")]
    Revoked,

    #[error("Missing bearer credential")]
    MissingCredential,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Authentication errors outside of token validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Unknown guard: {guard}")]
    UnknownGuard { guard: String },
}

/// Top-level domain error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Whether this error is an authentication rejection, as opposed to an
    /// internal failure. Rejections map to 401; everything else to 500.
    pub fn is_rejection(&self) -> bool {
        matches!(self, DomainError::Token(_) | DomainError::Auth(_))
    }
}
