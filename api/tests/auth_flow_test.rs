//! End-to-end tests for the auth endpoints and the guard middleware,
//! running against the in-memory cache and user store.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::json;

use sg_api::{routes, AppState, APP_GUARD};
use sg_core::domain::entities::token::TokenOutput;
use sg_core::domain::entities::user::UserAttributes;
use sg_core::repositories::cache::MemoryCache;
use sg_core::repositories::user::{MockUserStore, UserStoreRegistry};
use sg_core::services::token::{TokenService, TokenServiceConfig};

fn test_service_config() -> TokenServiceConfig {
    TokenServiceConfig {
        secret: "test-secret".to_string(),
        ..Default::default()
    }
}

async fn test_state(config: TokenServiceConfig) -> web::Data<AppState> {
    let store = Arc::new(MockUserStore::new());
    store
        .insert_with_password(UserAttributes::new("42").with_name("Ada"), "hunter2")
        .await;

    let users = Arc::new(UserStoreRegistry::new().register(APP_GUARD, store.clone()));
    let tokens = Arc::new(TokenService::new(
        Arc::new(MemoryCache::new()),
        Arc::clone(&users),
        config,
    ));

    web::Data::new(AppState::new(tokens, users, store))
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(routes::configure),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr, $login:expr, $password:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "login": $login, "password": $password }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let output: TokenOutput = test::read_body_json(resp).await;
        output
    }};
}

#[actix_web::test]
async fn test_login_issues_bearer_token() {
    let state = test_state(test_service_config()).await;
    let app = test_app!(state);

    let output = login!(app, "42", "hunter2");
    assert_eq!(output.token_type, "bearer");
    assert_eq!(output.expires_in, 3600);
    assert!(!output.access_token.is_empty());
}

#[actix_web::test]
async fn test_login_rejects_bad_credentials() {
    let state = test_state(test_service_config()).await;
    let app = test_app!(state);

    for (user, pass) in [("42", "wrong"), ("missing", "hunter2")] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "login": user, "password": pass }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

#[actix_web::test]
async fn test_guard_rejects_missing_credential() {
    let state = test_state(test_service_config()).await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/auth/info").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_guard_rejects_garbage_token() {
    let state = test_state(test_service_config()).await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/auth/info")
        .insert_header(("Authorization", "Bearer not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_info_returns_authenticated_user() {
    let state = test_state(test_service_config()).await;
    let app = test_app!(state);

    let output = login!(app, "42", "hunter2");

    let req = test::TestRequest::get()
        .uri("/api/auth/info")
        .insert_header(("Authorization", format!("Bearer {}", output.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let user: UserAttributes = test::read_body_json(resp).await;
    assert_eq!(user.identity, "42");
    assert_eq!(user.name.as_deref(), Some("Ada"));
}

#[actix_web::test]
async fn test_logout_revokes_token() {
    let state = test_state(test_service_config()).await;
    let app = test_app!(state);

    let output = login!(app, "42", "hunter2");
    let auth = ("Authorization", format!("Bearer {}", output.access_token));

    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The revoked token no longer authenticates.
    let req = test::TestRequest::get()
        .uri("/api/auth/info")
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_logout_leaves_other_sessions_valid() {
    let state = test_state(test_service_config()).await;
    let app = test_app!(state);

    let first = login!(app, "42", "hunter2");
    let second = login!(app, "42", "hunter2");

    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .insert_header(("Authorization", format!("Bearer {}", first.access_token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // The other token for the same identity is untouched.
    let req = test::TestRequest::get()
        .uri("/api/auth/info")
        .insert_header(("Authorization", format!("Bearer {}", second.access_token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_refresh_headers_surface_replacement_token() {
    // TTL below the refresh grace period, so the first guarded request
    // triggers a refresh.
    let config = TokenServiceConfig {
        secret: "test-secret".to_string(),
        token_ttl_secs: 100,
        refresh_grace_secs: 110,
        ..Default::default()
    };
    let state = test_state(config).await;
    let app = test_app!(state);

    let output = login!(app, "42", "hunter2");

    let req = test::TestRequest::get()
        .uri("/api/auth/info")
        .insert_header(("Authorization", format!("Bearer {}", output.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    // The request itself is served by the original token.
    assert_eq!(resp.status(), StatusCode::OK);

    let new_token = resp
        .headers()
        .get("new-token")
        .expect("replacement token header")
        .to_str()
        .unwrap()
        .to_string();
    assert_ne!(new_token, output.access_token);
    assert_eq!(
        resp.headers().get("new-expires-in").unwrap().to_str().unwrap(),
        "100"
    );

    // The replacement authenticates; the refreshed original is revoked.
    let req = test::TestRequest::get()
        .uri("/api/auth/info")
        .insert_header(("Authorization", format!("Bearer {new_token}")))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/auth/info")
        .insert_header(("Authorization", format!("Bearer {}", output.access_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_no_refresh_outside_grace_window() {
    let state = test_state(test_service_config()).await;
    let app = test_app!(state);

    let output = login!(app, "42", "hunter2");

    let req = test::TestRequest::get()
        .uri("/api/auth/info")
        .insert_header(("Authorization", format!("Bearer {}", output.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get("new-token").is_none());
}
