//! Configuration for the token service

use chrono::Duration;
use sg_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: i64,
    /// Refresh grace period in seconds
    pub refresh_grace_secs: i64,
    /// Blacklist grace period in seconds (also the refresh lock lease)
    pub blacklist_grace_secs: i64,
    /// Clock-skew tolerance in seconds applied to `nbf`
    pub skew_tolerance_secs: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            token_ttl_secs: 3600,
            refresh_grace_secs: 1800,
            blacklist_grace_secs: 0,
            skew_tolerance_secs: 60,
        }
    }
}

impl TokenServiceConfig {
    /// Token lifetime as a duration
    pub fn token_ttl(&self) -> Duration {
        Duration::seconds(self.token_ttl_secs)
    }

    /// Refresh grace period as a duration
    pub fn refresh_grace(&self) -> Duration {
        Duration::seconds(self.refresh_grace_secs)
    }

    /// Blacklist grace period as a duration
    pub fn blacklist_grace(&self) -> Duration {
        Duration::seconds(self.blacklist_grace_secs)
    }

    /// Clock-skew tolerance as a duration
    pub fn skew_tolerance(&self) -> Duration {
        Duration::seconds(self.skew_tolerance_secs)
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            token_ttl_secs: config.token_ttl,
            refresh_grace_secs: config.refresh_grace_period,
            blacklist_grace_secs: config.blacklist_grace_period,
            skew_tolerance_secs: config.skew_tolerance,
        }
    }
}
