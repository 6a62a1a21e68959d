//! `atelier` binary: load config, open storage, serve the HTTP API.

use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing::info;

use atelier_core::telemetry::init_tracing;
use atelier_core::StorefrontConfig;
use atelier_server::middleware::LoggingMiddleware;
use atelier_server::{configure_app, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::load_from_env().context("loading configuration")?;
    init_tracing(&config.observability);

    let state = AppState::from_config(&config).context("opening storefront storage")?;
    let bind = config.server.bind_address();
    info!(%bind, "starting atelier");

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(LoggingMiddleware)
            .configure(configure_app(state.clone()))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind)
        .with_context(|| format!("binding {bind}"))?
        .run()
        .await
        .context("server stopped with an error")
}
