// Core review logic: the fixed system instruction and provider envelope parsing
pub mod extract;
pub mod prompt;

pub use extract::{extract_review_text, ExtractorChain, Extracted, TextExtractor, NO_VALID_RESPONSE};
pub use prompt::SYSTEM_INSTRUCTION;
