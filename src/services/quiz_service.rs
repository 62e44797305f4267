use std::{sync::Arc, time::Duration};

use crate::{
    constants::prompts,
    errors::{truncate_chars, AppError, AppResult},
    models::domain::{GenerationParams, QuizDocument},
    services::{
        generation_client::GenerationClient, language_model::GenerationError, retry::RetryPolicy,
        sanitize::parse_quiz,
    },
};

const QUIZ_ATTEMPTS: u32 = 3;
pub const QUIZ_RATE_LIMIT_MESSAGE: &str = "Quota exceeded. Please try again later.";

/// A quiz either parsed into its document, or the raw reply when every
/// attempt produced malformed JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    Structured(QuizDocument),
    Unstructured(String),
}

pub struct QuizService {
    client: Arc<GenerationClient>,
    retry: RetryPolicy,
}

impl QuizService {
    pub fn new(client: Arc<GenerationClient>, base_delay: Duration) -> Self {
        Self {
            client,
            retry: RetryPolicy::new(QUIZ_ATTEMPTS, base_delay),
        }
    }

    pub async fn generate_quiz(
        &self,
        text: &str,
        num_questions: i64,
        difficulty: &str,
    ) -> AppResult<QuizOutcome> {
        let prompt = prompts::quiz_prompt(text, num_questions, difficulty);
        log::info!("Generating {} {} questions", num_questions, difficulty);

        for attempt in self.retry.attempts() {
            let reply = match self.client.generate(&prompt, GenerationParams::QUIZ).await {
                Ok(reply) => reply,
                Err(err) => {
                    self.retry.absorb(attempt, err).await.map_err(quiz_failure)?;
                    continue;
                }
            };

            if reply.is_empty() {
                if self.retry.is_last(attempt) {
                    return Err(AppError::UpstreamError("Failed to generate quiz".to_string()));
                }
                continue;
            }

            match parse_quiz(&reply) {
                Ok(quiz) => {
                    log::info!("Generated {} questions", quiz.question_count());
                    return Ok(QuizOutcome::Structured(quiz));
                }
                Err(e) => {
                    log::warn!(
                        "Quiz parse attempt {} failed: {}",
                        attempt + 1,
                        truncate_chars(&e.to_string(), 50)
                    );
                    if self.retry.is_last(attempt) {
                        log::warn!("Returning raw quiz text after {} attempts", QUIZ_ATTEMPTS);
                        return Ok(QuizOutcome::Unstructured(reply));
                    }
                    self.retry.pause().await;
                }
            }
        }

        Err(AppError::UpstreamError(
            "Failed to generate quiz after retries".to_string(),
        ))
    }
}

fn quiz_failure(err: GenerationError) -> AppError {
    match err {
        GenerationError::RateLimited(_) => AppError::RateLimited(QUIZ_RATE_LIMIT_MESSAGE.to_string()),
        GenerationError::Other(msg) => {
            log::error!("Quiz generation error: {}", truncate_chars(&msg, 100));
            AppError::UpstreamError(format!(
                "Error: {}... Please try again.",
                truncate_chars(&msg, 100)
            ))
        }
    }
}
