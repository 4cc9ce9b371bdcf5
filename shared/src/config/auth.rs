//! JWT signing and token lifetime configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
///
/// Covers the full configuration surface of the token subsystem: signing
/// secret, token TTL, the refresh grace period (how early before expiry a
/// refresh is attempted), the blacklist grace period (lock lease and the
/// revocation read-side window) and the clock-skew tolerance applied to the
/// `nbf` claim at issuance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Token lifetime in seconds
    pub token_ttl: i64,

    /// Refresh grace period in seconds: a token closer than this to its
    /// expiry triggers a refresh attempt
    pub refresh_grace_period: i64,

    /// Blacklist grace period in seconds: revocation entries younger than
    /// this read as "not revoked", and refresh locks lease for this long.
    /// 0 disables the window.
    #[serde(default)]
    pub blacklist_grace_period: i64,

    /// Clock-skew tolerance in seconds, subtracted from the issuance
    /// instant to form the `nbf` claim
    #[serde(default = "default_skew_tolerance")]
    pub skew_tolerance: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-please-change-in-production"),
            token_ttl: 3600,
            refresh_grace_period: 1800,
            blacklist_grace_period: 0,
            skew_tolerance: default_skew_tolerance(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the token TTL in seconds
    pub fn with_token_ttl(mut self, seconds: i64) -> Self {
        self.token_ttl = seconds;
        self
    }

    /// Set the refresh grace period in seconds
    pub fn with_refresh_grace(mut self, seconds: i64) -> Self {
        self.refresh_grace_period = seconds;
        self
    }

    /// Set the blacklist grace period in seconds
    pub fn with_blacklist_grace(mut self, seconds: i64) -> Self {
        self.blacklist_grace_period = seconds;
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            token_ttl: env_i64("JWT_TOKEN_TTL", defaults.token_ttl),
            refresh_grace_period: env_i64("JWT_REFRESH_GRACE", defaults.refresh_grace_period),
            blacklist_grace_period: env_i64("JWT_BLACKLIST_GRACE", defaults.blacklist_grace_period),
            skew_tolerance: env_i64("JWT_SKEW_TOLERANCE", defaults.skew_tolerance),
        }
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-please-change-in-production"
    }
}

fn default_skew_tolerance() -> i64 {
    60
}

fn env_i64(name: &str, default: i64) -> i64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
