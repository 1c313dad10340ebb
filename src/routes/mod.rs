// Route exports
pub mod health;
pub mod review;
pub mod ui;

use crate::config::CorsSettings;
use crate::services::ReviewModel;
use actix_cors::Cors;
use actix_web::{error, http::header, http::StatusCode, web, HttpRequest, HttpResponse};
use serde::Serialize;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub reviewer: Arc<dyn ReviewModel>,
}

impl AppState {
    pub fn new(reviewer: Arc<dyn ReviewModel>) -> Self {
        Self { reviewer }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(review::configure)
        .configure(ui::configure);
}

/// Everything the application needs besides middleware: state, payload
/// limits and error handlers, and the route table.
pub fn app_config(state: AppState, body_limit: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::PayloadConfig::new(body_limit))
            .app_data(
                web::JsonConfig::default()
                    .limit(body_limit)
                    .error_handler(handle_json_payload_error),
            )
            .configure(configure_routes);
    }
}

/// Cross-origin policy: exactly the configured frontend origin, or any origin for `*`
pub fn cors(settings: &CorsSettings) -> Cors {
    let cors = if settings.allows_any_origin() {
        Cors::default().allow_any_origin()
    } else {
        Cors::default().allowed_origin(settings.allowed_origin.trim())
    };

    cors.allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600)
}

/// JSON error response for malformed request payloads
#[derive(Debug, Serialize)]
pub struct PayloadError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl PayloadError {
    pub fn invalid_json(err: impl std::fmt::Display) -> Self {
        Self {
            error: "invalid_json".to_string(),
            message: format!("Invalid JSON: {}", err),
            status_code: 400,
        }
    }

    pub fn invalid_form(err: impl std::fmt::Display) -> Self {
        Self {
            error: "invalid_form".to_string(),
            message: format!("Invalid form body: {}", err),
            status_code: 400,
        }
    }
}

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for PayloadError {}

impl error::ResponseError for PayloadError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
///
/// A wrong content type is an ordinary client mistake and is not logged.
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    if !matches!(err, error::JsonPayloadError::ContentType) {
        tracing::info!("JSON payload error on {}: {}", req.path(), err);
    }
    let status_code = match err {
        error::JsonPayloadError::OverflowKnownLength { .. } | error::JsonPayloadError::Overflow { .. } => 413,
        _ => 400,
    };
    PayloadError {
        status_code,
        ..PayloadError::invalid_json(&err)
    }
    .into()
}
