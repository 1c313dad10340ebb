// Response rendering: review markdown to HTML with highlighted code blocks
pub mod highlight;
pub mod markdown;

pub use highlight::{escape_html, highlight, Language};
pub use markdown::render_markdown;
