//! Business services

pub mod token;

pub use token::{RefreshLock, RevocationList, TokenCodec, TokenService, TokenServiceConfig};
