use actix_web::{middleware, App, HttpServer};
use review_assist::config::Settings;
use review_assist::routes::{self, AppState};
use review_assist::services::GeminiClient;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting review service...");

    if settings.model.api_key.trim().is_empty() {
        // Not fatal: every review will fail until a key is provided
        error!("No model API key configured (set GOOGLE_API_KEY)");
    }

    let client = GeminiClient::new(&settings.model).map_err(|e| {
        error!("Failed to create model client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!(
        "Model client initialized (model: {}, timeout: {}s)",
        client.model(),
        settings.model.timeout_secs
    );

    let state = AppState::new(Arc::new(client));

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let body_limit = settings.server.body_limit_bytes;
    let cors_settings = settings.cors.clone();

    if cors_settings.allows_any_origin() {
        info!("CORS: allowing any origin");
    } else {
        info!("CORS: allowing origin {}", cors_settings.allowed_origin);
    }

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors(&cors_settings))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::app_config(state.clone(), body_limit))
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
