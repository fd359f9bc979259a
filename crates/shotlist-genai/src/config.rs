//! Generative-AI client configuration.

use std::fmt;
use std::time::Duration;

use crate::error::{GenAiError, GenAiResult};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_PLAN_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";

/// Configuration for [`crate::GeminiClient`].
#[derive(Clone)]
pub struct GenAiConfig {
    /// Service credential, sent as `x-goog-api-key`
    pub api_key: String,
    /// Base URL of the Generative Language API
    pub base_url: String,
    /// Model used for scene planning
    pub plan_model: String,
    /// Model used for shot rendering
    pub image_model: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl GenAiConfig {
    /// Config with default endpoints and models for the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            plan_model: DEFAULT_PLAN_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            timeout: Duration::from_secs(120), // image renders can be slow
        }
    }

    /// Create config from environment variables.
    ///
    /// `GEMINI_API_KEY` (or `API_KEY`) is required; everything else has a default.
    pub fn from_env() -> GenAiResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .map_err(|_| GenAiError::config("GEMINI_API_KEY not set"))?;

        if api_key.trim().is_empty() {
            return Err(GenAiError::config("GEMINI_API_KEY is empty"));
        }

        let defaults = Self::new(api_key);

        Ok(Self {
            base_url: std::env::var("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            plan_model: std::env::var("GEMINI_PLAN_MODEL").unwrap_or(defaults.plan_model),
            image_model: std::env::var("GEMINI_IMAGE_MODEL").unwrap_or(defaults.image_model),
            timeout: std::env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            api_key: defaults.api_key,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn plan_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.plan_model
        )
    }

    pub(crate) fn image_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:predict",
            self.base_url.trim_end_matches('/'),
            self.image_model
        )
    }
}

impl fmt::Debug for GenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("plan_model", &self.plan_model)
            .field("image_model", &self.image_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}
