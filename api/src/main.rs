//! SessionGate API server entry point

use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use sg_api::config::ApiConfig;
use sg_api::{routes, AppState, APP_GUARD};
use sg_core::repositories::user::UserStoreRegistry;
use sg_core::services::token::{TokenService, TokenServiceConfig};
use sg_infra::cache::RedisClient;
use sg_infra::database::MySqlUserStore;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ApiConfig::from_env();

    if config.jwt.is_using_default_secret() {
        warn!("JWT_SECRET not set, using the development default");
    }

    let cache = RedisClient::new(config.cache.clone())
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let user_store = MySqlUserStore::connect(&config.database_url)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let users = Arc::new(
        UserStoreRegistry::new().register(APP_GUARD, Arc::new(user_store.clone())),
    );

    let tokens = Arc::new(TokenService::new(
        Arc::new(cache),
        Arc::clone(&users),
        TokenServiceConfig::from(&config.jwt),
    ));

    let state = web::Data::new(AppState::new(tokens, users, Arc::new(user_store)));

    info!(host = %config.host, port = config.port, "starting server");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
