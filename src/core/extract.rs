use serde_json::Value;

/// Text substituted when no extractor recognises the provider envelope
pub const NO_VALID_RESPONSE: &str = "⚠️ No valid response from AI.";

/// A single way of reading completion text out of a provider envelope.
pub trait TextExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns `None` when this shape is not present or carries no text.
    fn extract(&self, envelope: &Value) -> Option<String>;
}

/// Text exposed directly on the envelope: `{ "text": "..." }`
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectText;

impl TextExtractor for DirectText {
    fn name(&self) -> &'static str {
        "direct_text"
    }

    fn extract(&self, envelope: &Value) -> Option<String> {
        unwrap_envelope(envelope)
            .get("text")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }
}

/// Text nested in `candidates[].content.parts[].text`.
///
/// The first candidate carrying any text wins; its text parts are joined in
/// order. Parts flagged as model thoughts are not part of the answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct CandidateParts;

impl TextExtractor for CandidateParts {
    fn name(&self) -> &'static str {
        "candidate_parts"
    }

    fn extract(&self, envelope: &Value) -> Option<String> {
        let candidates = unwrap_envelope(envelope)
            .get("candidates")
            .and_then(Value::as_array)?;

        candidates.iter().find_map(|candidate| {
            let parts = candidate
                .get("content")
                .and_then(|c| c.get("parts"))
                .and_then(Value::as_array)?;

            let text: String = parts
                .iter()
                .filter(|part| !part.get("thought").and_then(Value::as_bool).unwrap_or(false))
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect();

            (!text.is_empty()).then_some(text)
        })
    }
}

/// SDK-style envelopes wrap the payload in `response`.
fn unwrap_envelope(envelope: &Value) -> &Value {
    envelope
        .get("response")
        .filter(|inner| inner.is_object())
        .unwrap_or(envelope)
}

/// Text recovered from an envelope and the extractor that recognised it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub text: String,
    pub extractor: &'static str,
}

/// Ordered chain of extractors; the first one to produce text wins.
pub struct ExtractorChain {
    extractors: Vec<Box<dyn TextExtractor>>,
}

impl ExtractorChain {
    pub fn new(extractors: Vec<Box<dyn TextExtractor>>) -> Self {
        Self { extractors }
    }

    pub fn extract(&self, envelope: &Value) -> Option<Extracted> {
        self.extractors.iter().find_map(|extractor| {
            extractor.extract(envelope).map(|text| Extracted {
                text,
                extractor: extractor.name(),
            })
        })
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl Default for ExtractorChain {
    fn default() -> Self {
        Self::new(vec![Box::new(DirectText), Box::new(CandidateParts)])
    }
}

/// Pull the review text out of a provider envelope.
///
/// Never fails: an unrecognised envelope yields [`NO_VALID_RESPONSE`] and a
/// single warning naming whatever block/finish reason the provider reported.
pub fn extract_review_text(envelope: &Value) -> String {
    let chain = ExtractorChain::default();

    match chain.extract(envelope) {
        Some(extracted) => {
            tracing::debug!("Review text extracted via {}", extracted.extractor);
            extracted.text
        }
        None => {
            let inner = unwrap_envelope(envelope);
            let block_reason = inner
                .pointer("/promptFeedback/blockReason")
                .and_then(Value::as_str)
                .unwrap_or("none");
            let finish_reason = inner
                .pointer("/candidates/0/finishReason")
                .and_then(Value::as_str)
                .unwrap_or("none");
            tracing::warn!(
                block_reason,
                finish_reason,
                "Unrecognized model response shape, substituting placeholder"
            );
            NO_VALID_RESPONSE.to_string()
        }
    }
}
