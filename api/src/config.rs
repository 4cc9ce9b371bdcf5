//! API server configuration

use sg_shared::config::{CacheConfig, JwtConfig};

/// Top-level server configuration, assembled from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Token subsystem configuration
    pub jwt: JwtConfig,
    /// Redis configuration
    pub cache: CacheConfig,
    /// MySQL connection URL for the user store
    pub database_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            jwt: JwtConfig::default(),
            cache: CacheConfig::default(),
            database_url: String::from("mysql://root@localhost:3306/sessiongate"),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            jwt: JwtConfig::from_env(),
            cache: CacheConfig::from_env(),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
        }
    }
}
