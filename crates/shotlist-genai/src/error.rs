//! Generative-AI client error types.

use thiserror::Error;

pub type GenAiResult<T> = Result<T, GenAiError>;

#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("Plan generation failed: {0}")]
    PlanGeneration(String),

    #[error("Image generation failed: {0}")]
    ImageGeneration(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GenAiError {
    pub fn plan(msg: impl Into<String>) -> Self {
        Self::PlanGeneration(msg.into())
    }

    pub fn image(msg: impl Into<String>) -> Self {
        Self::ImageGeneration(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Message suitable for showing to the user.
    ///
    /// Transport and parse details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            GenAiError::PlanGeneration(_) => "Failed to generate scene prompts from the AI. \
                The model may have returned an invalid JSON structure. Please try again."
                .to_string(),
            GenAiError::ImageGeneration(_) => {
                "Failed to generate an image. The model may have refused the prompt.".to_string()
            }
            GenAiError::Config(msg) => format!("The AI service is not configured: {}", msg),
        }
    }
}
