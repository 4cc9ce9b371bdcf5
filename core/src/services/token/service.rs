//! Main token service implementation

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::token::{Claims, TokenOutput};
use crate::errors::{DomainError, TokenError};
use crate::repositories::cache::CacheStore;
use crate::repositories::user::UserStoreRegistry;

use super::blacklist::RevocationList;
use super::codec::TokenCodec;
use super::config::TokenServiceConfig;
use super::lock::RefreshLock;

/// Orchestrates token issuance, validation, revocation and refresh
///
/// Holds no mutable state of its own; all shared mutable state (revocation
/// entries, lock entries) lives in the external cache and is coordinated
/// through the cache's atomicity guarantees. Collaborators are injected at
/// construction, so tests substitute the cache and user stores freely.
pub struct TokenService {
    codec: TokenCodec,
    blacklist: RevocationList,
    lock: RefreshLock,
    users: Arc<UserStoreRegistry>,
    config: TokenServiceConfig,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(
        cache: Arc<dyn CacheStore>,
        users: Arc<UserStoreRegistry>,
        config: TokenServiceConfig,
    ) -> Self {
        Self {
            codec: TokenCodec::new(&config.secret, config.skew_tolerance()),
            blacklist: RevocationList::new(Arc::clone(&cache), config.blacklist_grace()),
            lock: RefreshLock::new(cache),
            users,
            config,
        }
    }

    /// Issues a signed token for an identity under a guard name
    ///
    /// # Returns
    ///
    /// The client-facing token metadata plus the structured claims.
    pub fn issue(&self, identity: &str, issuer: &str) -> Result<(TokenOutput, Claims), DomainError> {
        let issued = self.codec.issue(identity, issuer, self.config.token_ttl())?;

        Ok((
            TokenOutput::new(issued.raw, self.config.token_ttl_secs),
            issued.claims,
        ))
    }

    /// Validates a raw token for a guard name
    ///
    /// Decode and signature/time verification first, then the revocation
    /// check, then the issuer check.
    ///
    /// # Errors
    ///
    /// `Expired`, `NotYetValid`, `InvalidSignature`, `Malformed` from the
    /// codec; `Revoked` if blacklisted; `IssuerMismatch` if the token was
    /// issued for a different guard.
    pub async fn validate(&self, raw_token: &str, expected_issuer: &str) -> Result<Claims, DomainError> {
        let claims = self.codec.decode(raw_token)?;

        if self.blacklist.is_revoked(raw_token).await {
            return Err(DomainError::Token(TokenError::Revoked));
        }

        if claims.iss != expected_issuer {
            return Err(DomainError::Token(TokenError::IssuerMismatch {
                expected: expected_issuer.to_string(),
                actual: claims.iss,
            }));
        }

        Ok(claims)
    }

    /// Attempts a sliding-expiration refresh for a validated token
    ///
    /// Does nothing unless the token is within the refresh grace period.
    /// At most one concurrent attempt per token wins the distributed lock;
    /// the others skip silently, because the original token is still valid
    /// for their request and the winner supplies the replacement. Never
    /// affects the current request's authorization outcome.
    pub async fn maybe_refresh(
        &self,
        raw_token: &str,
        claims: &Claims,
        expected_issuer: &str,
    ) -> Option<TokenOutput> {
        if !claims.is_within_refresh_window(self.config.refresh_grace()) {
            return None;
        }

        if !self.lock.try_acquire(&claims.jti, self.config.blacklist_grace()).await {
            debug!(jti = %claims.jti, "refresh already in progress, skipping");
            return None;
        }

        let output = self.refresh_locked(raw_token, claims, expected_issuer).await;
        self.lock.release(&claims.jti).await;
        output
    }

    /// The refresh critical section; the lock for `claims.jti` is held
    async fn refresh_locked(
        &self,
        raw_token: &str,
        claims: &Claims,
        expected_issuer: &str,
    ) -> Option<TokenOutput> {
        // A prior attempt may have completed between its release and our
        // acquire; its blacklist entry is the marker (grace-blind check).
        if self.blacklist.contains(raw_token).await {
            debug!(jti = %claims.jti, "token already refreshed, skipping");
            return None;
        }

        let store = match self.users.resolve(expected_issuer) {
            Ok(store) => store,
            Err(e) => {
                warn!("no user store for guard {expected_issuer}, skipping refresh: {e}");
                return None;
            }
        };

        // Fail open on lookup problems: the original token remains valid
        // until its own expiry.
        let user = match store.find_by_identity(&claims.sub).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(identity = %claims.sub, "identity no longer in user store, skipping refresh");
                return None;
            }
            Err(e) => {
                warn!("user store lookup failed, skipping refresh: {e}");
                return None;
            }
        };

        // The replacement is issued strictly before the old token is
        // revoked; a concurrent reader never observes "old revoked, no
        // replacement yet".
        let (output, _) = match self.issue(&user.identity, expected_issuer) {
            Ok(issued) => issued,
            Err(e) => {
                warn!("replacement token issuance failed: {e}");
                return None;
            }
        };

        if let Err(e) = self.blacklist.revoke(raw_token, claims.remaining_lifetime()).await {
            warn!("could not blacklist refreshed token, it stays valid until expiry: {e}");
        }

        Some(output)
    }

    /// Revokes a token for the rest of its natural lifetime
    ///
    /// Idempotent: revoking an already revoked token keeps the original
    /// revocation timestamp and succeeds.
    pub async fn logout(&self, raw_token: &str, claims: &Claims) -> Result<(), DomainError> {
        self.blacklist.revoke(raw_token, claims.remaining_lifetime()).await
    }
}
