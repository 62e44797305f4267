use std::borrow::Cow;

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::errors::AppError;

pub const SUMMARY_TEXT_MIN: usize = 100;
pub const SUMMARY_TEXT_MAX: usize = 30_000;
pub const QUIZ_TEXT_MIN: usize = 100;
pub const QUIZ_TEXT_MAX: usize = 20_000;
pub const QUIZ_QUESTIONS_MIN: i64 = 3;
pub const QUIZ_QUESTIONS_MAX: i64 = 15;
pub const FLOWCHART_TEXT_MIN: usize = 50;
pub const FLOWCHART_TEXT_MAX: usize = 15_000;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SummarizeRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "summary_text_bounds"))]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "quiz_text_bounds"))]
    pub text: String,

    #[serde(default = "default_num_questions")]
    #[validate(range(
        min = 3,
        max = 15,
        message = "Number of questions must be between 3 and 15."
    ))]
    pub num_questions: i64,

    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateFlowchartRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "flowchart_text_bounds"))]
    pub text: String,

    #[serde(default = "default_chart_style")]
    pub chart_style: String,
}

/// Why a JSON body could not be turned into a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BodyError {
    /// No body, a body that is not JSON, or one without a `text` field.
    #[error("request body has no text field")]
    MissingText,

    #[error("Invalid request body: {0}")]
    Malformed(String),
}

impl BodyError {
    /// `missing_text` is the endpoint's own wording for an absent text.
    pub fn into_app_error(self, missing_text: &str) -> AppError {
        match self {
            BodyError::MissingText => AppError::ValidationError(missing_text.to_string()),
            BodyError::Malformed(_) => AppError::ValidationError(self.to_string()),
        }
    }
}

/// Decodes a request from a JSON value that is already known to be JSON.
/// A missing `text` field is reported apart from other shape problems.
pub fn parse_body<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, BodyError> {
    if body.get("text").is_none() {
        return Err(BodyError::MissingText);
    }

    serde_json::from_value(body).map_err(|e| BodyError::Malformed(e.to_string()))
}

fn default_num_questions() -> i64 {
    5
}

fn default_difficulty() -> String {
    "medium".to_string()
}

fn default_chart_style() -> String {
    "TB".to_string()
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

fn text_bounds(
    text: &str,
    min: usize,
    max: usize,
    too_short: &'static str,
    too_long: &'static str,
) -> Result<(), ValidationError> {
    let length = text.chars().count();
    if length < min {
        return Err(ValidationError::new("text_too_short").with_message(Cow::Borrowed(too_short)));
    }
    if length > max {
        return Err(ValidationError::new("text_too_long").with_message(Cow::Borrowed(too_long)));
    }
    Ok(())
}

fn summary_text_bounds(text: &str) -> Result<(), ValidationError> {
    text_bounds(
        text,
        SUMMARY_TEXT_MIN,
        SUMMARY_TEXT_MAX,
        "Text is too short. Please provide at least 100 characters for meaningful analysis.",
        "Text is too long. Please provide text under 30,000 characters to stay within quota limits.",
    )
}

fn quiz_text_bounds(text: &str) -> Result<(), ValidationError> {
    text_bounds(
        text,
        QUIZ_TEXT_MIN,
        QUIZ_TEXT_MAX,
        "Text is too short. Please provide at least 100 characters.",
        "Text is too long. Please keep it under 20,000 characters.",
    )
}

fn flowchart_text_bounds(text: &str) -> Result<(), ValidationError> {
    text_bounds(
        text,
        FLOWCHART_TEXT_MIN,
        FLOWCHART_TEXT_MAX,
        "Text is too short. Please provide at least 50 characters describing the process.",
        "Text is too long. Please keep it under 15,000 characters.",
    )
}
