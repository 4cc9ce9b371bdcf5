//! Signed token codec: issuance and verification of compact JWT tokens.

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, IssuedToken};
use crate::errors::{DomainError, TokenError};

/// Encodes and decodes signed session tokens
///
/// Signing is symmetric (HS256) with one process-wide secret. Clock-skew
/// tolerance is applied at issuance by backdating `nbf`; verification runs
/// with zero leeway so the time claims mean exactly what they say.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    skew: Duration,
}

impl TokenCodec {
    /// Creates a codec from the shared signing secret
    pub fn new(secret: &str, skew: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            skew,
        }
    }

    /// Builds, signs and serializes a token
    ///
    /// `exp` is `now + ttl`, `nbf` is `now - skew`, and the `jti` is fresh
    /// for every call.
    pub fn issue(&self, identity: &str, issuer: &str, ttl: Duration) -> Result<IssuedToken, DomainError> {
        let claims = Claims::new(identity, issuer, ttl, self.skew);
        let raw = self.encode(&claims)?;

        Ok(IssuedToken { raw, claims })
    }

    /// Parses a raw token and verifies its signature and time claims
    ///
    /// # Errors
    /// * `TokenError::Expired` - `now >= exp`
    /// * `TokenError::NotYetValid` - `now < nbf`
    /// * `TokenError::InvalidSignature` - signature does not match
    /// * `TokenError::Malformed` - anything else that prevents parsing
    pub fn decode(&self, raw: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(raw, &self.decoding_key, &self.validation).map_err(|e| {
            let kind = match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::ImmatureSignature => TokenError::NotYetValid,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            };
            DomainError::Token(kind)
        })?;

        Ok(token_data.claims)
    }

    /// Signs and serializes pre-built claims
    pub(crate) fn encode(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))
    }
}
