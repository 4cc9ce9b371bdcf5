//! Shared utilities and common types for SessionGate
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response envelope types

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{CacheConfig, JwtConfig};
pub use types::ErrorResponse;
