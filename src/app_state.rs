use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::ModelHandle,
    services::{
        diagnostics_service::DiagnosticsService,
        flowchart_service::FlowchartService,
        generation_client::GenerationClient,
        language_model::{GeminiClient, LanguageModel},
        model_selector::select_model,
        quiz_service::QuizService,
        renderer::{DiagramRenderer, GraphvizRenderer},
        summary_service::SummaryService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub summary_service: Arc<SummaryService>,
    pub quiz_service: Arc<QuizService>,
    pub flowchart_service: Arc<FlowchartService>,
    pub diagnostics_service: Arc<DiagnosticsService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Connects to Gemini, selects the model every request will use and wires
    /// the feature services around it.
    pub async fn new(config: Config) -> AppResult<Self> {
        config.validate()?;

        let backend: Arc<dyn LanguageModel> = Arc::new(GeminiClient::new(&config)?);
        let model = select_model(backend.as_ref(), &config.candidate_models).await?;
        let renderer: Arc<dyn DiagramRenderer> =
            Arc::new(GraphvizRenderer::new(config.graphviz_dot.clone()));

        Ok(Self::with_components(config, backend, renderer, model))
    }

    pub fn with_components(
        config: Config,
        backend: Arc<dyn LanguageModel>,
        renderer: Arc<dyn DiagramRenderer>,
        model: ModelHandle,
    ) -> Self {
        let client = Arc::new(GenerationClient::new(backend, model));
        let delay = config.retry_base_delay;

        Self {
            summary_service: Arc::new(SummaryService::new(Arc::clone(&client), delay)),
            quiz_service: Arc::new(QuizService::new(Arc::clone(&client), delay)),
            flowchart_service: Arc::new(FlowchartService::new(
                Arc::clone(&client),
                renderer,
                delay,
            )),
            diagnostics_service: Arc::new(DiagnosticsService::new(client, config.api_configured())),
            config: Arc::new(config),
        }
    }
}
