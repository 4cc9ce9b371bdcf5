//! # SessionGate Core
//!
//! Core domain layer for the SessionGate authentication subsystem.
//! This crate contains the domain entities, the token services (codec,
//! revocation list, refresh lock, token service), port traits for the
//! shared cache and the external user store, and the error taxonomy.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
