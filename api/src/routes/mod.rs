//! Route configuration

pub mod auth;

use actix_web::web;

/// Configure all application routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    auth::configure(cfg);
}
