// Model exports
pub mod requests;
pub mod responses;

pub use requests::{HighlightRequest, RenderRequest, ReviewRequest, PROMPT_REQUIRED};
pub use responses::{ErrorResponse, HealthResponse, HighlightResponse, RenderResponse, ReviewResponse};
