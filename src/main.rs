use actix_web::{App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod model;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = AppState::new(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let allowed_origins = config.allowed_origins.clone();
    let json_limit = config.limits.max_json_body_bytes;

    tracing::info!(
        origins = ?allowed_origins,
        model = %config.provider.model,
        "Starting Kham pilot API server on {}",
        bind_addr
    );

    HttpServer::new(move || {
        App::new()
            .wrap(api::cors(&allowed_origins))
            .app_data(api::json_config(json_limit))
            .app_data(state.treaty_service.clone())
            .app_data(state.crisis_service.clone())
            .app_data(state.limits.clone())
            .configure(api::health::configure)
            .configure(api::treaty::configure)
            .configure(api::crisis::configure)
            .configure(api::extract::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
