//! MySQL-backed user store and credential verifier.
//!
//! The user store is an external collaborator of the token subsystem:
//! given an identity it returns user attributes or nothing. Password
//! verification uses bcrypt as an opaque one-way verifier.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use tracing::warn;

use sg_core::domain::entities::user::UserAttributes;
use sg_core::errors::DomainError;
use sg_core::repositories::user::{CredentialVerifier, UserStore};

/// User store over a MySQL `users` table
#[derive(Clone)]
pub struct MySqlUserStore {
    pool: MySqlPool,
}

impl MySqlUserStore {
    /// Create a store over an existing connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Connect to the database and create a store
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = MySqlPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl UserStore for MySqlUserStore {
    async fn find_by_identity(&self, identity: &str) -> Result<Option<UserAttributes>, DomainError> {
        let row = sqlx::query("SELECT id, name FROM users WHERE id = ?")
            .bind(identity)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("user lookup failed: {e}"),
            })?;

        match row {
            Some(row) => {
                let id: u64 = row.try_get("id").map_err(|e| DomainError::Internal {
                    message: format!("user row decode failed: {e}"),
                })?;
                let name: String = row.try_get("name").map_err(|e| DomainError::Internal {
                    message: format!("user row decode failed: {e}"),
                })?;

                Ok(Some(UserAttributes::new(id.to_string()).with_name(name)))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CredentialVerifier for MySqlUserStore {
    async fn verify(&self, login: &str, password: &str) -> Result<Option<UserAttributes>, DomainError> {
        let row = sqlx::query("SELECT id, name, password FROM users WHERE login = ?")
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("credential lookup failed: {e}"),
            })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: u64 = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("user row decode failed: {e}"),
        })?;
        let name: String = row.try_get("name").map_err(|e| DomainError::Internal {
            message: format!("user row decode failed: {e}"),
        })?;
        let password_hash: String = row.try_get("password").map_err(|e| DomainError::Internal {
            message: format!("user row decode failed: {e}"),
        })?;

        match bcrypt::verify(password, &password_hash) {
            Ok(true) => Ok(Some(UserAttributes::new(id.to_string()).with_name(name))),
            Ok(false) => Ok(None),
            Err(e) => {
                // An unparseable stored hash is a data problem, not a
                // client error; reject the login and log it.
                warn!(login, "stored password hash could not be verified: {e}");
                Ok(None)
            }
        }
    }
}
