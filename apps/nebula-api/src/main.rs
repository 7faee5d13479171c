//! # Nebula API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use nebula_api::observability::RequestIdMiddleware;
use nebula_api::telemetry::{TelemetryConfig, init_telemetry};
use nebula_api::{AppConfig, AppState, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let state = AppState::from_config(&config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize backends");
        std::io::Error::other(e.to_string())
    })?;

    tracing::info!(
        "Starting Nebula API Server on {}:{}{}/api",
        config.host,
        config.port,
        config.base_path
    );

    let base_path = config.base_path.clone();
    HttpServer::new(move || {
        let base_path = base_path.clone();
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(move |cfg| handlers::configure_routes(cfg, &base_path))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
