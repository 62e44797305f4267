#[cfg(test)]
pub mod fixtures {
    use crate::services::language_model::GenerationError;

    /// Text of exactly `len` characters that still reads like prose.
    pub fn distinct_text(len: usize) -> String {
        "Water boils at one hundred degrees. "
            .chars()
            .cycle()
            .take(len)
            .collect()
    }

    /// A quiz reply with `count` well-formed questions.
    pub fn quiz_json(count: usize) -> String {
        let questions: Vec<serde_json::Value> = (1..=count)
            .map(|n| {
                serde_json::json!({
                    "question": format!("Question {}?", n),
                    "options": { "A": "One", "B": "Two", "C": "Three", "D": "Four" },
                    "correct": "B",
                    "explanation": format!("Because of fact {}.", n),
                })
            })
            .collect();
        serde_json::json!({ "questions": questions }).to_string()
    }

    pub fn dot_source(rankdir: &str) -> String {
        format!(
            "digraph G {{\n    rankdir={};\n    start -> process -> end;\n}}",
            rankdir
        )
    }

    pub fn rate_limit_error() -> GenerationError {
        GenerationError::classify("429 Too Many Requests: quota exhausted")
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use actix_web::http::StatusCode;
    use async_trait::async_trait;

    use crate::{
        app_state::AppState,
        config::Config,
        models::domain::{GenerationRequest, ImageFormat, ModelHandle},
        services::{
            language_model::{GenerationError, LanguageModel},
            renderer::{DiagramRenderer, RenderError},
        },
    };

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }

    /// Replays canned replies in order; an exhausted script fails the call.
    pub struct ScriptedModel {
        replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    }

    impl ScriptedModel {
        pub fn new(replies: Vec<Result<String, GenerationError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
            }
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn generate(
            &self,
            _model: &str,
            _request: &GenerationRequest,
        ) -> Result<String, GenerationError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GenerationError::Other("script exhausted".to_string())))
        }
    }

    pub struct StaticRenderer;

    #[async_trait]
    impl DiagramRenderer for StaticRenderer {
        async fn render(&self, _source: &str, format: ImageFormat) -> Result<Vec<u8>, RenderError> {
            Ok(match format {
                ImageFormat::Svg => b"<svg></svg>".to_vec(),
                ImageFormat::Png => vec![0x89, b'P', b'N', b'G'],
            })
        }
    }

    pub fn svg_png_renderer() -> StaticRenderer {
        StaticRenderer
    }

    pub fn state_with_renderer(
        replies: Vec<Result<String, GenerationError>>,
        renderer: impl DiagramRenderer + 'static,
    ) -> AppState {
        AppState::with_components(
            Config::test_config(),
            Arc::new(ScriptedModel::new(replies)),
            Arc::new(renderer),
            ModelHandle::new("models/gemini-test"),
        )
    }

    pub fn state_replying(replies: Vec<Result<String, GenerationError>>) -> AppState {
        state_with_renderer(replies, StaticRenderer)
    }

    /// State whose upstream fails every call, for requests that must be
    /// rejected before reaching it.
    pub fn state_without_upstream() -> AppState {
        state_replying(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::sanitize::{parse_quiz, sanitize_dot};

    #[test]
    fn test_fixtures_distinct_text_has_requested_length() {
        assert_eq!(distinct_text(105).chars().count(), 105);
        assert!(distinct_text(40).starts_with("Water boils"));
    }

    #[test]
    fn test_fixtures_quiz_json_parses() {
        let quiz = parse_quiz(&quiz_json(4)).expect("fixture quiz should parse");
        assert_eq!(quiz.question_count(), 4);
    }

    #[test]
    fn test_fixtures_dot_source_is_already_clean() {
        let source = dot_source("TB");
        assert_eq!(sanitize_dot(&source).unwrap(), source);
    }

    #[test]
    fn test_fixtures_rate_limit_error_is_classified() {
        assert!(rate_limit_error().is_rate_limited());
    }
}
