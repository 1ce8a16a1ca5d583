//! UMKM Shop JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    catcher::Catcher,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use umkm_app::context::AppContext;

use crate::{config::ServerConfig, response::envelope_status_errors, state::State};

mod carts;
mod config;
mod errors;
mod extensions;
mod goods;
mod healthcheck;
mod observability;
mod payments;
mod reset;
mod response;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// UMKM Shop JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init_logging(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    observability::apply_runtime_config(&config);

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.database.database_max_connections,
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    if config.shop.enable_reset_endpoint {
        info!("reset endpoint enabled at /clear-db");
    }

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::shared(app, config.shop.default_page_size)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(router::app_router(config.shop.enable_reset_endpoint));

    let doc = OpenApi::new("UMKM Shop API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let service =
        Service::new(router).catcher(Catcher::default().hoop(envelope_status_errors));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(service).await;
}
