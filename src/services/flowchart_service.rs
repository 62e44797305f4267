use std::{sync::Arc, time::Duration};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{
    constants::prompts,
    errors::{truncate_chars, AppError, AppResult},
    models::domain::{FlowchartArtifact, GenerationParams, ImageFormat},
    services::{
        generation_client::GenerationClient,
        language_model::GenerationError,
        renderer::{DiagramRenderer, RenderError},
        retry::RetryPolicy,
        sanitize::sanitize_dot,
    },
};

const FLOWCHART_ATTEMPTS: u32 = 5;
pub const FLOWCHART_RATE_LIMIT_MESSAGE: &str = "API quota exceeded. Please try again later.";
pub const FLOWCHART_UNRENDERABLE_MESSAGE: &str = "Could not render the flowchart. The generated code has syntax issues. Please try with a simpler description or different wording.";
pub const FLOWCHART_INVALID_FORMAT_MESSAGE: &str =
    "Generated code format is invalid. Please try with a simpler description.";
const FLOWCHART_UNEXPECTED_MESSAGE: &str =
    "Unexpected error occurred. Please try again with a simpler description.";

pub struct FlowchartService {
    client: Arc<GenerationClient>,
    renderer: Arc<dyn DiagramRenderer>,
    retry: RetryPolicy,
}

impl FlowchartService {
    pub fn new(
        client: Arc<GenerationClient>,
        renderer: Arc<dyn DiagramRenderer>,
        base_delay: Duration,
    ) -> Self {
        Self {
            client,
            renderer,
            retry: RetryPolicy::new(FLOWCHART_ATTEMPTS, base_delay).retrying_unexpected(),
        }
    }

    /// Generates DOT for `text` and renders it. Quota retries and render
    /// repairs share one attempt budget; after a render failure the next
    /// attempt sends the corrective prompt instead.
    pub async fn generate_flowchart(
        &self,
        text: &str,
        chart_style: &str,
    ) -> AppResult<FlowchartArtifact> {
        let mut prompt = prompts::flowchart_prompt(text, chart_style);
        log::info!("Generating flowchart ({} chars, rankdir={})", text.chars().count(), chart_style);

        for attempt in self.retry.attempts() {
            log::info!("Flowchart attempt {}/{}", attempt + 1, FLOWCHART_ATTEMPTS);

            let reply = match self.client.generate(&prompt, GenerationParams::FLOWCHART).await {
                Ok(reply) => reply,
                Err(err) => {
                    self.retry.absorb(attempt, err).await.map_err(flowchart_failure)?;
                    continue;
                }
            };

            if reply.is_empty() {
                if self.retry.is_last(attempt) {
                    return Err(AppError::UpstreamError(
                        "Failed to generate flowchart".to_string(),
                    ));
                }
                self.retry.pause().await;
                continue;
            }

            let source = match sanitize_dot(&reply) {
                Ok(source) => source,
                Err(e) => {
                    log::warn!("Rejected flowchart reply: {}", e);
                    if self.retry.is_last(attempt) {
                        return Err(AppError::UnrenderableOutput(
                            FLOWCHART_INVALID_FORMAT_MESSAGE.to_string(),
                        ));
                    }
                    self.retry.pause().await;
                    continue;
                }
            };

            match self.render(source).await {
                Ok(artifact) => return Ok(artifact),
                Err(e) => {
                    let detail = e.to_string();
                    log::warn!("Render error: {}", detail);
                    if self.retry.is_last(attempt) {
                        return Err(AppError::UnrenderableOutput(
                            FLOWCHART_UNRENDERABLE_MESSAGE.to_string(),
                        ));
                    }
                    self.retry.pause().await;
                    prompt = prompts::flowchart_correction_prompt(&detail, chart_style, text);
                }
            }
        }

        Err(AppError::UpstreamError(
            "Failed to generate valid flowchart after multiple attempts. Please try simplifying your description or breaking it into smaller steps."
                .to_string(),
        ))
    }

    async fn render(&self, source: String) -> Result<FlowchartArtifact, RenderError> {
        let svg_bytes = self.renderer.render(&source, ImageFormat::Svg).await?;
        let svg = String::from_utf8(svg_bytes).map_err(|e| RenderError::InvalidOutput {
            format: ImageFormat::Svg,
            detail: e.to_string(),
        })?;
        log::info!("SVG rendered ({} bytes)", svg.len());

        let png = self.renderer.render(&source, ImageFormat::Png).await?;
        log::info!("PNG rendered ({} bytes)", png.len());

        Ok(FlowchartArtifact {
            source,
            svg,
            png_base64: STANDARD.encode(png),
        })
    }
}

fn flowchart_failure(err: GenerationError) -> AppError {
    match err {
        GenerationError::RateLimited(_) => {
            AppError::RateLimited(FLOWCHART_RATE_LIMIT_MESSAGE.to_string())
        }
        GenerationError::Other(msg) => {
            log::error!("Flowchart generation error: {}", truncate_chars(&msg, 200));
            AppError::UpstreamError(FLOWCHART_UNEXPECTED_MESSAGE.to_string())
        }
    }
}
