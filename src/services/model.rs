use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when asking a model for a review
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model provider API key is not configured")]
    MissingApiKey,

    #[error("Model provider timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Model provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Something that can review source code and answer in markdown.
///
/// The request handler only sees this trait; the provider client is injected
/// through the application state.
#[async_trait]
pub trait ReviewModel: Send + Sync {
    async fn review(&self, code: &str) -> Result<String, ModelError>;
}
