use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Message returned when a review is requested without code
pub const PROMPT_REQUIRED: &str = "Prompt is required";

/// Request to review a piece of source code
///
/// `code` is forwarded to the model verbatim; absent, `null` and empty values
/// are rejected before any model call. Numbers and `true` are accepted and
/// forwarded as their text; `0` and `false` count as no code.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReviewRequest {
    #[validate(required(message = "Prompt is required"), length(min = 1, message = "Prompt is required"))]
    #[serde(default, deserialize_with = "deserialize_code")]
    pub code: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CodeValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let code = match Option::<CodeValue>::deserialize(deserializer)? {
        Some(CodeValue::Text(text)) => Some(text),
        Some(CodeValue::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Some(CodeValue::Flag(true)) => Some("true".to_string()),
        Some(CodeValue::Number(_)) | Some(CodeValue::Flag(false)) | None => None,
    };
    Ok(code)
}

impl ReviewRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
        }
    }
}

/// Request to render review markdown as HTML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub text: String,
}

/// Request to highlight the editor contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "javascript".to_string()
}
