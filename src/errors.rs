use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Errors that reach the HTTP layer. The message of each variant is already
/// phrased for the end user and is echoed back verbatim.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("{0}")]
    UnrenderableOutput(String),

    #[error("{0}")]
    UpstreamError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::RateLimited(_) => "RATE_LIMITED",
            AppError::UnrenderableOutput(_) => "UNRENDERABLE_OUTPUT",
            AppError::UpstreamError(_) => "UPSTREAM_ERROR",
            AppError::ConfigurationError(_) => "CONFIGURATION_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::UnrenderableOutput(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        log::debug!("responding with {}: {}", self.error_code(), self);
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
        })
    }
}

/// The summarizer page reads every reply, failures included, from an
/// `answer` field. This wrapper keeps the status mapping of [`AppError`] but
/// renders that envelope instead of `{error}`.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct AnswerError(#[from] pub AppError);

#[derive(Debug, Serialize)]
pub struct AnswerErrorResponse {
    pub answer: String,
    pub code: u16,
}

impl ResponseError for AnswerError {
    fn status_code(&self) -> StatusCode {
        self.0.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(AnswerErrorResponse {
            answer: self.0.to_string(),
            code: self.status_code().as_u16(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let fields = err.field_errors();
        let message = fields
            .get("text")
            .or_else(|| fields.values().next())
            .and_then(|errors| errors.first())
            .and_then(|e| e.message.as_ref().map(|m| m.to_string()));

        AppError::ValidationError(message.unwrap_or_else(|| err.to_string()))
    }
}

/// Cuts `s` to at most `max_chars` characters so upstream diagnostics echoed
/// to clients stay short.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::RateLimited("test".into()).status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::UnrenderableOutput("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UpstreamError("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        let err = AppError::RateLimited("Quota exceeded. Please try again later.".into());
        assert_eq!(err.to_string(), "Quota exceeded. Please try again later.");
    }

    #[test]
    fn test_answer_error_keeps_status() {
        let err = AnswerError::from(AppError::ValidationError("too short".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "too short");
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "text must be longer"))]
        text: String,
        #[validate(range(min = 1, message = "count must be positive"))]
        count: i64,
    }

    #[test]
    fn test_validation_errors_prefer_text_message() {
        let sample = Sample {
            text: "a".into(),
            count: 0,
        };
        let err: AppError = sample.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "text must be longer");
    }

    #[test]
    fn test_validation_errors_fall_back_to_other_fields() {
        let sample = Sample {
            text: "abcd".into(),
            count: 0,
        };
        let err: AppError = sample.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "count must be positive");
    }
}
