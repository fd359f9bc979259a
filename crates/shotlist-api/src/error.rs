//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shotlist_packager::PackagerError;
use shotlist_pipeline::{IntakeError, PipelineError};
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Packaging error: {0}")]
    Packaging(#[from] PackagerError),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Intake(IntakeError::IndexOutOfRange { .. }) => StatusCode::NOT_FOUND,
            ApiError::Intake(IntakeError::Read { .. } | IntakeError::Encode { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Intake(_) => StatusCode::BAD_REQUEST,
            ApiError::Pipeline(PipelineError::Busy) => StatusCode::CONFLICT,
            ApiError::Internal(_) | ApiError::Pipeline(_) | ApiError::Packaging(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't expose internal error details in production
        let detail = if status.is_server_error()
            && std::env::var("ENVIRONMENT").unwrap_or_default() == "production"
        {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(PipelineError::Busy).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(IntakeError::IndexOutOfRange { index: 3, len: 1 }).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(IntakeError::EmptyFile("a.png".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(PackagerError::DuplicateEntry("01_x.jpg".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
