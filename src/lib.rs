//! Review Assist - AI code review service
//!
//! Accepts source code over HTTP, forwards it to a hosted generative model
//! together with a fixed reviewer instruction, and returns the model's
//! markdown critique. Also serves a small editor page that renders reviews.

pub mod config;
pub mod core;
pub mod models;
pub mod render;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{extract_review_text, NO_VALID_RESPONSE, SYSTEM_INSTRUCTION};
pub use models::{ErrorResponse, ReviewRequest, ReviewResponse};
pub use routes::{app_config, cors, AppState};
pub use services::{GeminiClient, ModelError, ReviewModel};
