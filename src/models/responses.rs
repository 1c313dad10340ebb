use serde::{Deserialize, Serialize};

/// Successful review: markdown returned by the model, untouched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub text: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Rendered review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResponse {
    pub html: String,
}

/// Highlighted editor contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightResponse {
    pub html: String,
}
