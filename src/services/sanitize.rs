//! Clean-up of semi-structured model replies.
//!
//! Each clean-up is an ordered list of pure `&str -> String` steps so the
//! individual repairs stay small and testable on their own.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::{errors::truncate_chars, models::domain::QuizDocument};

type Step = fn(&str) -> String;

fn apply(steps: &[Step], text: &str) -> String {
    steps
        .iter()
        .fold(text.to_string(), |current, step| step(&current))
}

// ---------------------------------------------------------------------------
// Quiz JSON
// ---------------------------------------------------------------------------

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("JSON_FENCE is a valid regex pattern")
});

#[derive(Debug, Error)]
pub enum QuizParseError {
    #[error("invalid quiz JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("quiz contains no questions")]
    NoQuestions,
}

/// Removes a markdown fence around a JSON reply. A block tagged `json` wins;
/// otherwise a reply that both opens and closes with a fence is unwrapped.
pub fn strip_json_fence(text: &str) -> String {
    let text = text.trim();

    if let Some(body) = JSON_FENCE.captures(text).and_then(|caps| caps.get(1)) {
        return body.as_str().to_string();
    }

    if text.starts_with("```") && text.ends_with("```") {
        let inner = text.trim_matches('`').trim();
        return inner.strip_prefix("json").unwrap_or(inner).trim().to_string();
    }

    text.to_string()
}

const QUIZ_STEPS: [Step; 1] = [strip_json_fence];

/// Parses a quiz reply. Any question lacking `question`, `options` or
/// `correct` makes the whole document malformed.
pub fn parse_quiz(raw: &str) -> Result<QuizDocument, QuizParseError> {
    let cleaned = apply(&QUIZ_STEPS, raw);
    let document: QuizDocument = serde_json::from_str(&cleaned)?;

    if document.questions.is_empty() {
        return Err(QuizParseError::NoQuestions);
    }

    Ok(document)
}

// ---------------------------------------------------------------------------
// Graphviz DOT
// ---------------------------------------------------------------------------

pub const GRAPH_KEYWORD: &str = "digraph";

const DOT_FENCE_TAGS: [&str; 3] = ["```dot", "```graphviz", "```"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DotSanitizeError {
    #[error("reply does not start with `digraph`: {preview}")]
    MissingGraphKeyword { preview: String },
}

/// Keeps only the body of the first fenced block, trying the `dot` tag, then
/// `graphviz`, then a bare fence.
pub fn strip_dot_fence(text: &str) -> String {
    let text = text.trim();
    if !text.contains("```") {
        return text.to_string();
    }

    for tag in DOT_FENCE_TAGS {
        if let Some((_, after)) = text.split_once(tag) {
            let body = after.split("```").next().unwrap_or(after);
            return body.trim().to_string();
        }
    }

    text.to_string()
}

/// Drops prose before the graph keyword and after the last closing brace.
pub fn trim_to_graph(text: &str) -> String {
    let Some(start) = text.find(GRAPH_KEYWORD) else {
        return text.to_string();
    };

    let graph = &text[start..];
    match graph.rfind('}') {
        Some(end) if end > 0 => graph[..=end].to_string(),
        _ => graph.to_string(),
    }
}

/// Appends the closing brace that truncated replies tend to lose.
pub fn close_graph(text: &str) -> String {
    if text.trim_end().ends_with('}') {
        text.to_string()
    } else {
        format!("{}\n}}", text)
    }
}

/// The DOT grammar is ASCII-only: typographic dashes and quotes break it.
pub fn normalize_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}

const DOT_EXTRACTION_STEPS: [Step; 2] = [strip_dot_fence, trim_to_graph];
const DOT_REPAIR_STEPS: [Step; 2] = [close_graph, normalize_punctuation];

/// Turns a model reply into DOT source that starts with `digraph` and ends
/// with `}`.
pub fn sanitize_dot(raw: &str) -> Result<String, DotSanitizeError> {
    let extracted = apply(&DOT_EXTRACTION_STEPS, raw);

    if !extracted.starts_with(GRAPH_KEYWORD) {
        return Err(DotSanitizeError::MissingGraphKeyword {
            preview: truncate_chars(&extracted, 100).to_string(),
        });
    }

    Ok(apply(&DOT_REPAIR_STEPS, &extracted))
}
