//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token type reported to clients
pub const TOKEN_TYPE: &str = "bearer";

/// Claims structure for the JWT payload
///
/// The issuer (`iss`) carries the guard name, so several independent
/// authentication realms can share one codec and one signing secret. The
/// `jti` identifies this token instance, distinct from the subject: revoking
/// one token never affects other tokens issued for the same identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: opaque identity of the authenticated user
    pub sub: String,

    /// Issuer: guard name of the realm this token was issued for
    pub iss: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp (issuance instant minus the skew tolerance)
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for this token instance)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for a token
    ///
    /// `exp` is always `now + ttl` and `nbf` is backdated by `skew` to
    /// tolerate clock drift between the issuing and validating hosts.
    pub fn new(identity: impl Into<String>, issuer: impl Into<String>, ttl: Duration, skew: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: identity.into(),
            iss: issuer.into(),
            iat: now.timestamp(),
            nbf: (now - skew).timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Remaining lifetime of the token; zero once expired
    pub fn remaining_lifetime(&self) -> Duration {
        let remaining = self.exp - Utc::now().timestamp();
        if remaining > 0 {
            Duration::seconds(remaining)
        } else {
            Duration::zero()
        }
    }

    /// Whether the token is close enough to expiry that a refresh should
    /// be attempted
    pub fn is_within_refresh_window(&self, grace: Duration) -> bool {
        self.exp - Utc::now().timestamp() < grace.num_seconds()
    }
}

/// A freshly signed token: the serialized string plus its structured claims
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Serialized, signed token string
    pub raw: String,

    /// The claims embedded in the token
    pub claims: Claims,
}

/// Token metadata returned to the client on issuance and refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOutput {
    /// The signed token string
    pub access_token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    /// Token type, always "bearer"
    pub token_type: String,
}

impl TokenOutput {
    /// Creates token metadata for a freshly issued token
    pub fn new(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            expires_in,
            token_type: TOKEN_TYPE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_construction() {
        let claims = Claims::new("42", "app", Duration::seconds(3600), Duration::seconds(60));

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.iss, "app");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.iat - claims.nbf, 60);
        assert!(claims.nbf < claims.exp);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_fresh_jti_per_token() {
        let a = Claims::new("42", "app", Duration::seconds(60), Duration::zero());
        let b = Claims::new("42", "app", Duration::seconds(60), Duration::zero());
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_claims_expiration() {
        let mut claims = Claims::new("42", "app", Duration::seconds(60), Duration::zero());
        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
        assert_eq!(claims.remaining_lifetime(), Duration::zero());
    }

    #[test]
    fn test_remaining_lifetime() {
        let claims = Claims::new("42", "app", Duration::seconds(3600), Duration::zero());
        let remaining = claims.remaining_lifetime();

        assert!(remaining > Duration::seconds(3590));
        assert!(remaining <= Duration::seconds(3600));
    }

    #[test]
    fn test_refresh_window() {
        let claims = Claims::new("42", "app", Duration::seconds(100), Duration::zero());

        assert!(claims.is_within_refresh_window(Duration::seconds(110)));
        assert!(!claims.is_within_refresh_window(Duration::seconds(50)));
    }

    #[test]
    fn test_claims_serialization() {
        let claims = Claims::new("42", "app", Duration::seconds(3600), Duration::seconds(60));
        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(claims, deserialized);
    }

    #[test]
    fn test_token_output() {
        let output = TokenOutput::new("signed".to_string(), 3600);
        assert_eq!(output.token_type, "bearer");
        assert_eq!(output.expires_in, 3600);
    }
}
