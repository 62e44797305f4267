use crate::{
    constants::prompts::PROBE_PROMPT,
    errors::{truncate_chars, AppError, AppResult},
    models::domain::{GenerationParams, GenerationRequest, ModelHandle},
    services::language_model::{GenerationError, LanguageModel},
};

/// Probes `candidates` in order and returns the first model that answers a
/// trivial prompt. Runs once at startup; failing here is fatal.
pub async fn select_model(
    backend: &dyn LanguageModel,
    candidates: &[String],
) -> AppResult<ModelHandle> {
    log::info!("Selecting upstream model from {} candidates", candidates.len());
    let probe = GenerationRequest::new(PROBE_PROMPT, GenerationParams::PROBE);

    for candidate in candidates {
        log::info!("Trying {}...", candidate);

        match backend.generate(candidate, &probe).await {
            Ok(text) if !text.is_empty() => {
                log::info!("Using model {}", candidate);
                return Ok(ModelHandle::probed(candidate.as_str()));
            }
            Ok(_) => log::warn!("{} - empty probe reply, trying next", candidate),
            Err(GenerationError::RateLimited(_)) => {
                log::warn!("{} - quota exceeded, trying next", candidate)
            }
            Err(GenerationError::Other(msg)) => {
                log::warn!("{} - {}...", candidate, truncate_chars(&msg, 50))
            }
        }
    }

    Err(AppError::UpstreamError(
        "All candidate models failed the startup probe. Wait for the quota to reset or use a different API key."
            .to_string(),
    ))
}
