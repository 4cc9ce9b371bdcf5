//! # SessionGate API
//!
//! HTTP layer for the token subsystem: the auth guard middleware and the
//! login/logout/info endpoints, built on actix-web.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{AppState, APP_GUARD};
