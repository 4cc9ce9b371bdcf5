//! # SessionGate Infrastructure
//!
//! Implementations of the core port traits against real backends:
//! the shared cache on Redis and the external user store on MySQL.

pub mod cache;
pub mod database;

use sg_core::errors::DomainError;
use thiserror::Error;

/// Infrastructure layer errors
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Cache operation timed out after {timeout_ms}ms")]
    CacheTimeout { timeout_ms: u64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Cache(_) | InfrastructureError::CacheTimeout { .. } => {
                DomainError::Cache {
                    message: err.to_string(),
                }
            }
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
