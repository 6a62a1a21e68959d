//! # atelier-server
//!
//! actix-web HTTP API for the Atelier storefront: public catalog, checkout,
//! order and commission lookups, back-in-stock requests, the admin panel API
//! behind a signed session token, and media serving for uploaded images.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod state;

use actix_web::web;

pub use errors::{AppError, AppResult};
pub use state::AppState;

/// Register state, extractor configs, and every route.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let signer = state.signer.clone();
        cfg.app_data(web::Data::new(state))
            .app_data(errors::json_config())
            .app_data(errors::query_config());
        handlers::catalog::configure(cfg);
        handlers::orders::configure(cfg);
        handlers::custom_orders::configure(cfg);
        handlers::stock_requests::configure(cfg);
        handlers::admin::configure(cfg, signer);
        handlers::media::configure(cfg);
    }
}
