//! Unit tests for the token service

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::UserAttributes;
use crate::errors::{DomainError, TokenError};
use crate::repositories::cache::{CacheStore, MemoryCache};
use crate::repositories::user::{MockUserStore, UserStore, UserStoreRegistry};
use crate::services::token::{TokenCodec, TokenService, TokenServiceConfig};

const SECRET: &str = "test-secret";
const GUARD: &str = "app";

struct Fixture {
    service: Arc<TokenService>,
    cache: Arc<MemoryCache>,
    users: Arc<MockUserStore>,
}

async fn fixture(config: TokenServiceConfig) -> Fixture {
    let cache = Arc::new(MemoryCache::new());
    let users = Arc::new(MockUserStore::new());
    users.insert(UserAttributes::new("42").with_name("Ada")).await;

    let registry = Arc::new(
        UserStoreRegistry::new().register(GUARD, Arc::clone(&users) as Arc<dyn UserStore>),
    );

    let service = Arc::new(TokenService::new(
        Arc::clone(&cache) as Arc<dyn CacheStore>,
        registry,
        config,
    ));

    Fixture { service, cache, users }
}

fn config(ttl: i64, refresh_grace: i64, blacklist_grace: i64) -> TokenServiceConfig {
    TokenServiceConfig {
        secret: SECRET.to_string(),
        token_ttl_secs: ttl,
        refresh_grace_secs: refresh_grace,
        blacklist_grace_secs: blacklist_grace,
        skew_tolerance_secs: 60,
    }
}

#[tokio::test]
async fn test_issue_then_validate() {
    let f = fixture(config(3600, 60, 0)).await;

    let (output, _) = f.service.issue("42", GUARD).unwrap();
    assert_eq!(output.expires_in, 3600);
    assert_eq!(output.token_type, "bearer");

    let claims = f.service.validate(&output.access_token, GUARD).await.unwrap();
    assert_eq!(claims.sub, "42");
    assert_eq!(claims.iss, GUARD);
}

#[tokio::test]
async fn test_validate_expired_token() {
    let f = fixture(config(3600, 60, 0)).await;

    // A token whose expiry has already passed, signed with the same secret
    let codec = TokenCodec::new(SECRET, Duration::seconds(60));
    let mut claims = Claims::new("42", GUARD, Duration::seconds(3600), Duration::seconds(60));
    claims.exp = Utc::now().timestamp() - 3601;
    let raw = codec.encode(&claims).unwrap();

    assert_eq!(
        f.service.validate(&raw, GUARD).await.unwrap_err(),
        DomainError::Token(TokenError::Expired)
    );
}

#[tokio::test]
async fn test_validate_issuer_mismatch() {
    let f = fixture(config(3600, 60, 0)).await;

    let (output, _) = f.service.issue("42", "admin").unwrap();

    assert_eq!(
        f.service.validate(&output.access_token, GUARD).await.unwrap_err(),
        DomainError::Token(TokenError::IssuerMismatch {
            expected: GUARD.to_string(),
            actual: "admin".to_string(),
        })
    );
}

#[tokio::test]
async fn test_logout_revokes_until_expiry() {
    let f = fixture(config(3600, 60, 0)).await;

    let (output, claims) = f.service.issue("42", GUARD).unwrap();
    f.service.logout(&output.access_token, &claims).await.unwrap();

    assert_eq!(
        f.service.validate(&output.access_token, GUARD).await.unwrap_err(),
        DomainError::Token(TokenError::Revoked)
    );

    // A freshly issued token for the same identity is unaffected
    let (second, _) = f.service.issue("42", GUARD).unwrap();
    assert!(f.service.validate(&second.access_token, GUARD).await.is_ok());
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let f = fixture(config(3600, 60, 0)).await;

    let (output, claims) = f.service.issue("42", GUARD).unwrap();
    f.service.logout(&output.access_token, &claims).await.unwrap();
    f.service.logout(&output.access_token, &claims).await.unwrap();

    assert_eq!(
        f.service.validate(&output.access_token, GUARD).await.unwrap_err(),
        DomainError::Token(TokenError::Revoked)
    );
}

#[tokio::test]
async fn test_validate_fails_open_when_cache_is_down() {
    let f = fixture(config(3600, 60, 0)).await;

    let (output, claims) = f.service.issue("42", GUARD).unwrap();
    f.service.logout(&output.access_token, &claims).await.unwrap();

    // With the cache unreachable the revoked token reads as usable; strict
    // revocation is traded for availability.
    f.cache.set_available(false);
    assert!(f.service.validate(&output.access_token, GUARD).await.is_ok());

    f.cache.set_available(true);
    assert!(f.service.validate(&output.access_token, GUARD).await.is_err());
}

#[tokio::test]
async fn test_refresh_replaces_token_within_grace() {
    // refresh grace exceeds the TTL, so every request is within the window
    let f = fixture(config(100, 110, 0)).await;

    let (output, claims) = f.service.issue("42", GUARD).unwrap();

    let refreshed = f
        .service
        .maybe_refresh(&output.access_token, &claims, GUARD)
        .await
        .expect("refresh should produce a replacement");

    assert_eq!(
        f.service.validate(&output.access_token, GUARD).await.unwrap_err(),
        DomainError::Token(TokenError::Revoked)
    );

    let new_claims = f.service.validate(&refreshed.access_token, GUARD).await.unwrap();
    assert_eq!(new_claims.sub, "42");
    assert_ne!(new_claims.jti, claims.jti);
}

#[tokio::test]
async fn test_refresh_skipped_outside_grace() {
    let f = fixture(config(3600, 10, 0)).await;

    let (output, claims) = f.service.issue("42", GUARD).unwrap();

    assert!(f
        .service
        .maybe_refresh(&output.access_token, &claims, GUARD)
        .await
        .is_none());
    assert!(f.service.validate(&output.access_token, GUARD).await.is_ok());
}

#[tokio::test]
async fn test_refresh_skipped_when_user_store_fails() {
    let f = fixture(config(100, 110, 0)).await;

    let (output, claims) = f.service.issue("42", GUARD).unwrap();
    f.users.set_available(false);

    // Lookup failure aborts only the refresh; the token stays valid
    assert!(f
        .service
        .maybe_refresh(&output.access_token, &claims, GUARD)
        .await
        .is_none());
    assert!(f.service.validate(&output.access_token, GUARD).await.is_ok());

    // The lock was released, so a later attempt succeeds
    f.users.set_available(true);
    assert!(f
        .service
        .maybe_refresh(&output.access_token, &claims, GUARD)
        .await
        .is_some());
}

#[tokio::test]
async fn test_refresh_skipped_for_unknown_identity() {
    let f = fixture(config(100, 110, 0)).await;

    let (output, claims) = f.service.issue("1337", GUARD).unwrap();

    assert!(f
        .service
        .maybe_refresh(&output.access_token, &claims, GUARD)
        .await
        .is_none());
    assert!(f.service.validate(&output.access_token, GUARD).await.is_ok());
}

#[tokio::test]
async fn test_concurrent_refresh_produces_one_replacement() {
    let f = fixture(config(100, 110, 5)).await;

    let (output, claims) = f.service.issue("42", GUARD).unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = Arc::clone(&f.service);
        let raw = output.access_token.clone();
        let claims = claims.clone();
        handles.push(tokio::spawn(async move {
            service.maybe_refresh(&raw, &claims, GUARD).await
        }));
    }

    let mut replacements = Vec::new();
    for handle in handles {
        if let Some(refreshed) = handle.await.unwrap() {
            replacements.push(refreshed);
        }
    }

    assert_eq!(replacements.len(), 1);
    assert!(f
        .service
        .validate(&replacements[0].access_token, GUARD)
        .await
        .is_ok());
}
