use std::{sync::Arc, time::Duration};

use crate::{
    constants::prompts,
    errors::{truncate_chars, AppError, AppResult},
    models::domain::GenerationParams,
    services::{
        generation_client::GenerationClient, language_model::GenerationError, retry::RetryPolicy,
    },
};

const SUMMARY_ATTEMPTS: u32 = 3;
pub const SUMMARY_RATE_LIMIT_MESSAGE: &str =
    "⚠️ Rate limit reached. Please wait a moment and try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub answer: String,
    pub model: String,
    pub text_length: usize,
}

pub struct SummaryService {
    client: Arc<GenerationClient>,
    retry: RetryPolicy,
}

impl SummaryService {
    pub fn new(client: Arc<GenerationClient>, base_delay: Duration) -> Self {
        Self {
            client,
            retry: RetryPolicy::new(SUMMARY_ATTEMPTS, base_delay),
        }
    }

    /// `text` is expected to be trimmed and within the accepted length range.
    pub async fn summarize(&self, text: &str) -> AppResult<Summary> {
        let text_length = text.chars().count();
        let prompt = prompts::summary_prompt(text, text_length);
        let model = self.client.model();

        log::info!("Summarizing {} chars with {}", text_length, model.identifier);

        for attempt in self.retry.attempts() {
            match self.client.generate(&prompt, GenerationParams::SUMMARY).await {
                Ok(answer) if !answer.is_empty() => {
                    log::info!("Summary generated on attempt {}", attempt + 1);
                    return Ok(Summary {
                        answer,
                        model: model.display_name().to_string(),
                        text_length,
                    });
                }
                Ok(_) => log::warn!("Empty summary on attempt {}", attempt + 1),
                Err(err) => self.retry.absorb(attempt, err).await.map_err(summary_failure)?,
            }
        }

        Err(AppError::UpstreamError(
            "Error: Unable to generate response after retries.".to_string(),
        ))
    }
}

fn summary_failure(err: GenerationError) -> AppError {
    match err {
        GenerationError::RateLimited(_) => {
            AppError::RateLimited(SUMMARY_RATE_LIMIT_MESSAGE.to_string())
        }
        GenerationError::Other(msg) => {
            log::error!("Summarize error: {}", msg);
            AppError::UpstreamError(format!(
                "Error: {}... Please try again.",
                truncate_chars(&msg, 200)
            ))
        }
    }
}
