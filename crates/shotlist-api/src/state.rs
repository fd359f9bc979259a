//! Application state.

use std::sync::Arc;

use shotlist_genai::{GeminiClient, GenAiResult, SceneService};
use shotlist_pipeline::{ImageIntake, Orchestrator};

use crate::config::ApiConfig;

/// Shared application state: one generation session per process.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub intake: Arc<ImageIntake>,
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// Create state backed by the Gemini client configured from the environment.
    pub fn new(config: ApiConfig) -> GenAiResult<Self> {
        let client = GeminiClient::from_env()?;
        Ok(Self::with_service(config, Arc::new(client)))
    }

    /// Create state around any scene service.
    pub fn with_service(config: ApiConfig, service: Arc<dyn SceneService>) -> Self {
        Self {
            config,
            intake: Arc::new(ImageIntake::new()),
            orchestrator: Arc::new(Orchestrator::new(service)),
        }
    }
}
