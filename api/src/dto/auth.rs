//! Auth endpoint request/response types.
//!
//! The login success body is `sg_core`'s `TokenOutput`, serialized as-is.

use serde::{Deserialize, Serialize};

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login name presented by the client
    pub login: String,
    /// Plain-text password, verified against the stored hash
    pub password: String,
}

/// Logout confirmation body
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

impl LogoutResponse {
    pub fn ok() -> Self {
        Self {
            message: "Logged out successfully".to_string(),
        }
    }
}
