//! Configuration module
//!
//! Configuration is organized by concern:
//! - `auth` - JWT signing and token lifetime configuration
//! - `cache` - Shared cache (Redis) configuration

pub mod auth;
pub mod cache;

pub use auth::JwtConfig;
pub use cache::CacheConfig;
