//! Port traits for external collaborators
//!
//! The shared cache and the user store are external systems; the domain
//! layer only sees these traits. Mock implementations live next to each
//! trait so downstream crates can test against them.

pub mod cache;
pub mod user;

pub use cache::{CacheStore, MemoryCache};
pub use user::{CredentialVerifier, MockUserStore, UserStore, UserStoreRegistry};
