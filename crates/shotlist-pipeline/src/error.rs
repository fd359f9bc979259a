//! Pipeline error types.

use std::path::PathBuf;

use shotlist_genai::GenAiError;
use thiserror::Error;

pub type IntakeResult<T> = Result<T, IntakeError>;
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Failures while accepting or editing product photos.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("{file_name}: unsupported media type '{media_type}' (PNG or JPEG only)")]
    UnsupportedMediaType { file_name: String, media_type: String },

    #[error("{0}: file is empty")]
    EmptyFile(String),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file_name}: encoding failed: {message}")]
    Encode { file_name: String, message: String },

    #[error("Image index {index} out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failures that end a generation run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Scene planning failed: {0}")]
    Plan(#[source] GenAiError),

    #[error("Rendering shot {sequence_number} failed: {source}")]
    Image {
        sequence_number: u32,
        #[source]
        source: GenAiError,
    },

    #[error("A generation run is already in progress")]
    Busy,
}

impl PipelineError {
    /// Message published in the generation snapshot.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Plan(e) => e.user_message(),
            PipelineError::Image { source, .. } => source.user_message(),
            PipelineError::Busy => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_comes_from_source() {
        let err = PipelineError::Image {
            sequence_number: 3,
            source: GenAiError::image("no predictions returned"),
        };
        assert!(err.to_string().contains("shot 3"));
        assert_eq!(
            err.user_message(),
            "Failed to generate an image. The model may have refused the prompt."
        );
    }

    #[test]
    fn test_intake_error_display() {
        let err = IntakeError::UnsupportedMediaType {
            file_name: "door.gif".to_string(),
            media_type: "image/gif".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "door.gif: unsupported media type 'image/gif' (PNG or JPEG only)"
        );

        let err = IntakeError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Image index 4 out of range (have 2)");
    }
}
