use std::sync::Arc;

use crate::{
    constants::prompts::{HEALTH_PROMPT, TEST_API_PROMPT},
    models::domain::GenerationParams,
    services::{generation_client::GenerationClient, language_model::GenerationError},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub model: String,
    pub api_configured: bool,
    pub model_working: bool,
}

impl HealthReport {
    pub fn status(&self) -> &'static str {
        if self.model_working {
            "healthy"
        } else {
            "degraded"
        }
    }
}

/// Lightweight upstream checks. Results never influence the selected model.
pub struct DiagnosticsService {
    client: Arc<GenerationClient>,
    api_configured: bool,
}

impl DiagnosticsService {
    pub fn new(client: Arc<GenerationClient>, api_configured: bool) -> Self {
        Self {
            client,
            api_configured,
        }
    }

    pub fn model_identifier(&self) -> &str {
        &self.client.model().identifier
    }

    pub async fn health(&self) -> HealthReport {
        let model_working = match self
            .client
            .generate(HEALTH_PROMPT, GenerationParams::DIAGNOSTIC)
            .await
        {
            Ok(text) => !text.is_empty(),
            Err(e) => {
                log::warn!("Health probe failed: {}", e);
                false
            }
        };

        HealthReport {
            model: self.model_identifier().to_string(),
            api_configured: self.api_configured,
            model_working,
        }
    }

    /// Asks the model to say "OK" using as few tokens as possible.
    pub async fn test_api(&self) -> Result<String, GenerationError> {
        self.client
            .generate(TEST_API_PROMPT, GenerationParams::DIAGNOSTIC)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::ModelHandle,
        services::language_model::{LanguageModel, MockLanguageModel},
    };

    fn service(backend: MockLanguageModel) -> DiagnosticsService {
        let backend: Arc<dyn LanguageModel> = Arc::new(backend);
        let client = GenerationClient::new(backend, ModelHandle::new("models/gemini-test"));
        DiagnosticsService::new(Arc::new(client), true)
    }

    #[tokio::test]
    async fn test_healthy_when_probe_answers() {
        let mut backend = MockLanguageModel::new();
        backend
            .expect_generate()
            .withf(|_, request| {
                request.prompt == "Test" && request.params.max_output_tokens == Some(10)
            })
            .times(1)
            .returning(|_, _| Ok("Test received".to_string()));

        let report = service(backend).health().await;

        assert!(report.model_working);
        assert_eq!(report.status(), "healthy");
        assert_eq!(report.model, "models/gemini-test");
    }

    #[tokio::test]
    async fn test_degraded_when_probe_fails() {
        let mut backend = MockLanguageModel::new();
        backend
            .expect_generate()
            .returning(|_, _| Err(GenerationError::classify("503 Service Unavailable")));

        let report = service(backend).health().await;

        assert!(!report.model_working);
        assert_eq!(report.status(), "degraded");
        assert!(report.api_configured);
    }

    #[tokio::test]
    async fn test_api_passes_errors_through() {
        let mut backend = MockLanguageModel::new();
        backend
            .expect_generate()
            .withf(|_, request| request.prompt == "Say 'OK'")
            .returning(|_, _| Err(GenerationError::classify("429")));

        let err = service(backend).test_api().await.unwrap_err();
        assert!(err.is_rate_limited());
    }
}
