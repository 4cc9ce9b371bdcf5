//! Error types for the token subsystem

mod types;

pub use types::{AuthError, DomainError, TokenError};
