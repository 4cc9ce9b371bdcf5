//! Token service module
//!
//! This module handles all token-related operations:
//! - Signed token issuance and verification (JWT, HS256)
//! - Revocation via a cache-backed blacklist
//! - The sliding-expiration refresh protocol and its distributed lock

mod blacklist;
mod codec;
mod config;
mod lock;
mod service;

#[cfg(test)]
mod tests;

pub use blacklist::RevocationList;
pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use lock::RefreshLock;
pub use service::TokenService;
