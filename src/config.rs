use std::{env, time::Duration};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

pub const DEFAULT_CANDIDATE_MODELS: [&str; 4] = [
    "models/gemini-2.0-flash",
    "models/gemini-flash-latest",
    "models/gemini-2.5-flash",
    "models/gemini-2.0-flash-exp",
];

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: SecretString,
    pub gemini_base_url: String,
    pub candidate_models: Vec<String>,
    pub gemini_timeout: Duration,
    pub graphviz_dot: String,
    pub retry_base_delay: Duration,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: SecretString::from(env::var("GEMINI_API_KEY").unwrap_or_default()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            candidate_models: env::var("GEMINI_MODELS")
                .ok()
                .map(|raw| parse_model_list(&raw))
                .unwrap_or_else(|| {
                    DEFAULT_CANDIDATE_MODELS
                        .iter()
                        .map(|m| m.to_string())
                        .collect()
                }),
            gemini_timeout: Duration::from_secs(
                env::var("GEMINI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(90),
            ),
            graphviz_dot: env::var("GRAPHVIZ_DOT").unwrap_or_else(|_| "dot".to_string()),
            retry_base_delay: Duration::from_secs(
                env::var("RETRY_BASE_DELAY_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2),
            ),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.trim().is_empty()),
        }
    }

    /// Checks the settings the server cannot start without.
    pub fn validate(&self) -> AppResult<()> {
        if self.gemini_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ConfigurationError(
                "GEMINI_API_KEY not found in environment variables".to_string(),
            ));
        }

        if self.candidate_models.is_empty() {
            return Err(AppError::ConfigurationError(
                "GEMINI_MODELS must name at least one model".to_string(),
            ));
        }

        Ok(())
    }

    pub fn api_configured(&self) -> bool {
        !self.gemini_api_key.expose_secret().is_empty()
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            gemini_api_key: SecretString::from("test-api-key".to_string()),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            candidate_models: vec!["models/gemini-test".to_string()],
            gemini_timeout: Duration::from_secs(5),
            graphviz_dot: "dot".to_string(),
            retry_base_delay: Duration::ZERO,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            cors_allowed_origin: None,
        }
    }
}

fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
