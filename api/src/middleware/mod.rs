//! Middleware components

pub mod auth;

pub use auth::{AuthContext, AuthGuard, OptionalAuth};
