use std::sync::Arc;

use crate::{
    models::domain::{GenerationParams, GenerationRequest, ModelHandle},
    services::language_model::{GenerationError, LanguageModel},
};

/// Binds the upstream backend to the model selected at startup so feature
/// services only supply a prompt and their sampling parameters.
pub struct GenerationClient {
    backend: Arc<dyn LanguageModel>,
    model: ModelHandle,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn LanguageModel>, model: ModelHandle) -> Self {
        Self { backend, model }
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GenerationError> {
        let request = GenerationRequest::new(prompt, params);
        self.backend.generate(&self.model.identifier, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::language_model::MockLanguageModel;

    #[tokio::test]
    async fn test_generate_targets_selected_model_with_given_params() {
        let mut backend = MockLanguageModel::new();
        backend
            .expect_generate()
            .withf(|model, request| {
                model == "models/gemini-test"
                    && request.prompt == "Explain tides"
                    && request.params == GenerationParams::SUMMARY
            })
            .times(1)
            .returning(|_, _| Ok("Tides are caused by the moon.".to_string()));

        let client = GenerationClient::new(Arc::new(backend), ModelHandle::new("models/gemini-test"));
        let text = client
            .generate("Explain tides", GenerationParams::SUMMARY)
            .await
            .unwrap();

        assert_eq!(text, "Tides are caused by the moon.");
        assert_eq!(client.model().display_name(), "gemini-test");
    }
}
