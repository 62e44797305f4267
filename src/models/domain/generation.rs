/// Sampling options sent with a single upstream call. `None` leaves the
/// upstream default in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
    pub max_output_tokens: Option<u32>,
}

impl GenerationParams {
    /// Startup model probe: upstream defaults only.
    pub const PROBE: Self = Self {
        temperature: None,
        top_p: None,
        top_k: None,
        max_output_tokens: None,
    };

    pub const SUMMARY: Self = Self {
        temperature: Some(0.7),
        top_p: Some(0.95),
        top_k: None,
        max_output_tokens: Some(1024),
    };

    pub const QUIZ: Self = Self {
        temperature: Some(0.8),
        top_p: Some(0.95),
        top_k: None,
        max_output_tokens: Some(2048),
    };

    // Lower temperature keeps the DOT grammar intact more often.
    pub const FLOWCHART: Self = Self {
        temperature: Some(0.4),
        top_p: Some(0.8),
        top_k: Some(40),
        max_output_tokens: Some(2000),
    };

    pub const DIAGNOSTIC: Self = Self {
        temperature: None,
        top_p: None,
        top_k: None,
        max_output_tokens: Some(10),
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub params: GenerationParams,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, params: GenerationParams) -> Self {
        Self {
            prompt: prompt.into(),
            params,
        }
    }
}

/// The upstream model chosen at startup. Built once and shared read-only.
/// `probed_working` is set only when the startup probe got a reply from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelHandle {
    pub identifier: String,
    pub probed_working: bool,
}

impl ModelHandle {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            probed_working: false,
        }
    }

    pub fn probed(identifier: impl Into<String>) -> Self {
        Self {
            probed_working: true,
            ..Self::new(identifier)
        }
    }

    /// Identifier without the `models/` resource prefix.
    pub fn display_name(&self) -> &str {
        self.identifier
            .strip_prefix("models/")
            .unwrap_or(&self.identifier)
    }
}
