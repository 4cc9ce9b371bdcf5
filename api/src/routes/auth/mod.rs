//! Authentication routes.
//!
//! `/api/auth/login` is public; `/api/auth/logout` and `/api/auth/info`
//! sit behind the auth guard.

pub mod info;
pub mod login;
pub mod logout;

use actix_web::web;

use crate::app::APP_GUARD;
use crate::middleware::AuthGuard;

/// Configure authentication routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/login", web::post().to(login::login))
            .service(
                web::scope("")
                    .wrap(AuthGuard::new(APP_GUARD))
                    .route("/logout", web::post().to(logout::logout))
                    .route("/info", web::get().to(info::info)),
            ),
    );
}
