use crate::models::{ErrorResponse, ReviewRequest, ReviewResponse, PROMPT_REQUIRED};
use crate::routes::{AppState, PayloadError};
use crate::services::ReviewModel;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use tracing::Instrument;
use validator::Validate;

/// Configure review routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/ai").route("/get-review", web::post().to(get_review)));
}

/// Review endpoint
///
/// POST /ai/get-review
///
/// Request body (JSON or URL-encoded):
/// ```json
/// { "code": "function greet() {}" }
/// ```
async fn get_review(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, PayloadError> {
    let request = decode_review_request(req.content_type(), &body)?;
    Ok(handle_review_request(state.reviewer.as_ref(), request).await)
}

/// Decode a review body by content type.
///
/// An empty body or an unrecognised content type decodes to a request without
/// code, which validation then rejects with "Prompt is required". Only a body
/// that claims to be JSON or a form and fails to parse is a payload error.
pub fn decode_review_request(content_type: &str, body: &[u8]) -> Result<ReviewRequest, PayloadError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ReviewRequest::default());
    }

    match content_type.to_ascii_lowercase().as_str() {
        "application/json" => serde_json::from_slice(body).map_err(|e| {
            tracing::info!("Malformed JSON review body: {}", e);
            PayloadError::invalid_json(e)
        }),
        "application/x-www-form-urlencoded" => {
            let query = std::str::from_utf8(body).map_err(PayloadError::invalid_form)?;
            web::Query::<ReviewRequest>::from_query(query)
                .map(web::Query::into_inner)
                .map_err(|e| {
                    tracing::info!("Malformed form review body: {}", e);
                    PayloadError::invalid_form(e)
                })
        }
        other => {
            tracing::debug!("Ignoring review body with content type {:?}", other);
            Ok(ReviewRequest::default())
        }
    }
}

/// Validate the request, ask the model once, and map the outcome to a response.
///
/// - missing/empty code: `400 {"error": "Prompt is required"}`, model untouched
/// - model answered: `200 {"text": ...}` with the text unchanged
/// - model failed: `500 {"error": ...}`
pub async fn handle_review_request(reviewer: &dyn ReviewModel, request: ReviewRequest) -> HttpResponse {
    if let Err(errors) = request.validate() {
        tracing::info!("Rejected review request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(PROMPT_REQUIRED));
    }

    // validated above
    let code = request.code.unwrap_or_default();

    let span = tracing::info_span!(
        "review",
        request_id = %uuid::Uuid::new_v4(),
        prompt_bytes = code.len()
    );

    async move {
        match reviewer.review(&code).await {
            Ok(text) => {
                tracing::info!("Review generated ({} bytes)", text.len());
                HttpResponse::Ok().json(ReviewResponse { text })
            }
            Err(e) => {
                tracing::error!("Model API error: {}", e);
                HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
            }
        }
    }
    .instrument(span)
    .await
}
