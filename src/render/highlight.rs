//! Syntax highlighting for review code blocks and the editor pane.
//!
//! Code is parsed with tree-sitter grammars and coloured from each grammar's
//! highlight query. Output is escaped HTML with `tok-*` span classes.

use pulldown_cmark_escape::escape_html as write_escaped;
use std::sync::OnceLock;
use tree_sitter_highlight::{Highlight, HighlightConfiguration, HighlightEvent, Highlighter};

/// Highlight query capture names we colour, and the class each one gets.
/// Captures are matched by their most specific listed prefix.
const HIGHLIGHT_CLASSES: &[(&str, &str)] = &[
    ("comment", "tok-comment"),
    ("string", "tok-string"),
    ("escape", "tok-string"),
    ("number", "tok-number"),
    ("boolean", "tok-literal"),
    ("constant.builtin", "tok-literal"),
    ("keyword", "tok-keyword"),
    ("function", "tok-function"),
    ("type", "tok-type"),
    ("property", "tok-property"),
    ("variable.builtin", "tok-variable"),
];

/// Languages with a bundled grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    TypeScript,
    Tsx,
    Rust,
    Python,
    Go,
    Shell,
    Json,
    Plain,
}

static JAVASCRIPT: OnceLock<Option<HighlightConfiguration>> = OnceLock::new();
static TYPESCRIPT: OnceLock<Option<HighlightConfiguration>> = OnceLock::new();
static TSX: OnceLock<Option<HighlightConfiguration>> = OnceLock::new();
static RUST: OnceLock<Option<HighlightConfiguration>> = OnceLock::new();
static PYTHON: OnceLock<Option<HighlightConfiguration>> = OnceLock::new();
static GO: OnceLock<Option<HighlightConfiguration>> = OnceLock::new();
static SHELL: OnceLock<Option<HighlightConfiguration>> = OnceLock::new();
static JSON: OnceLock<Option<HighlightConfiguration>> = OnceLock::new();

impl Language {
    /// Map a fenced-code info string (`js`, `rust,ignore`, `Python`) to a language
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag
            .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match tag.as_str() {
            "js" | "javascript" | "jsx" | "mjs" | "cjs" | "node" => Language::JavaScript,
            "ts" | "typescript" | "mts" | "cts" => Language::TypeScript,
            "tsx" => Language::Tsx,
            "rs" | "rust" => Language::Rust,
            "py" | "python" | "python3" => Language::Python,
            "go" | "golang" => Language::Go,
            "sh" | "bash" | "shell" | "zsh" => Language::Shell,
            "json" => Language::Json,
            _ => Language::Plain,
        }
    }

    /// Grammar and highlight query, built once per language
    fn config(self) -> Option<&'static HighlightConfiguration> {
        let cached = match self {
            Language::JavaScript => JAVASCRIPT.get_or_init(|| {
                build_config(
                    tree_sitter_javascript::LANGUAGE.into(),
                    "javascript",
                    tree_sitter_javascript::HIGHLIGHT_QUERY,
                )
            }),
            Language::TypeScript => TYPESCRIPT.get_or_init(|| {
                build_config(
                    tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
                    "typescript",
                    &typescript_query(),
                )
            }),
            Language::Tsx => TSX.get_or_init(|| {
                build_config(
                    tree_sitter_typescript::LANGUAGE_TSX.into(),
                    "tsx",
                    &typescript_query(),
                )
            }),
            Language::Rust => RUST.get_or_init(|| {
                build_config(tree_sitter_rust::LANGUAGE.into(), "rust", tree_sitter_rust::HIGHLIGHTS_QUERY)
            }),
            Language::Python => PYTHON.get_or_init(|| {
                build_config(
                    tree_sitter_python::LANGUAGE.into(),
                    "python",
                    tree_sitter_python::HIGHLIGHTS_QUERY,
                )
            }),
            Language::Go => GO.get_or_init(|| {
                build_config(tree_sitter_go::LANGUAGE.into(), "go", tree_sitter_go::HIGHLIGHTS_QUERY)
            }),
            Language::Shell => SHELL.get_or_init(|| {
                build_config(tree_sitter_bash::LANGUAGE.into(), "bash", tree_sitter_bash::HIGHLIGHT_QUERY)
            }),
            Language::Json => JSON.get_or_init(|| {
                build_config(tree_sitter_json::LANGUAGE.into(), "json", tree_sitter_json::HIGHLIGHTS_QUERY)
            }),
            Language::Plain => return None,
        };

        cached.as_ref()
    }
}

/// TypeScript's query only covers what it adds on top of JavaScript
fn typescript_query() -> String {
    format!(
        "{}\n{}",
        tree_sitter_typescript::HIGHLIGHTS_QUERY,
        tree_sitter_javascript::HIGHLIGHT_QUERY
    )
}

fn build_config(
    language: tree_sitter::Language,
    name: &str,
    highlights: &str,
) -> Option<HighlightConfiguration> {
    match HighlightConfiguration::new(language, name, highlights, "", "") {
        Ok(mut config) => {
            let names: Vec<&str> = HIGHLIGHT_CLASSES.iter().map(|(capture, _)| *capture).collect();
            config.configure(&names);
            Some(config)
        }
        Err(e) => {
            tracing::warn!("Failed to load {} highlight query, code will not be coloured: {}", name, e);
            None
        }
    }
}

/// Highlight `code` as HTML with `tok-*` span classes.
///
/// Unknown languages are only escaped.
pub fn highlight(code: &str, language: &str) -> String {
    highlight_as(code, Language::from_tag(language))
}

pub fn highlight_as(code: &str, language: Language) -> String {
    let Some(config) = language.config() else {
        return escape_html(code);
    };

    let mut highlighter = Highlighter::new();
    let events = match highlighter.highlight(config, code.as_bytes(), None, |_| None) {
        Ok(events) => events,
        Err(e) => {
            tracing::debug!("Highlighting failed for {:?}: {}", language, e);
            return escape_html(code);
        }
    };

    let mut out = String::with_capacity(code.len() * 2);
    for event in events {
        match event {
            Ok(HighlightEvent::Source { start, end }) => {
                push_escaped(&mut out, code.get(start..end).unwrap_or_default());
            }
            Ok(HighlightEvent::HighlightStart(Highlight(index))) => {
                let class = HIGHLIGHT_CLASSES.get(index).map(|(_, class)| *class).unwrap_or("tok-other");
                out.push_str("<span class=\"");
                out.push_str(class);
                out.push_str("\">");
            }
            Ok(HighlightEvent::HighlightEnd) => out.push_str("</span>"),
            Err(e) => {
                tracing::debug!("Highlighting failed for {:?}: {}", language, e);
                return escape_html(code);
            }
        }
    }

    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

fn push_escaped(out: &mut String, text: &str) {
    // writing into a String cannot fail
    let _ = write_escaped(out, text);
}
