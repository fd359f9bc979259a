//! Download handlers.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use shotlist_packager::{download_all, download_one, DownloadFile};
use shotlist_models::SceneData;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

fn current_scene(state: &AppState) -> ApiResult<SceneData> {
    state
        .orchestrator
        .snapshot()
        .scene
        .ok_or_else(|| ApiError::not_found("No scene has been generated"))
}

fn attachment(file: DownloadFile) -> ApiResult<Response> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.content_type)
        .header(header::CONTENT_LENGTH, file.bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.file_name.replace('"', "")),
        )
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from(file.bytes))
        .map_err(|e| ApiError::internal(format!("Failed to build response: {}", e)))
}

/// Download the rendered image of one shot, by sequence number.
pub async fn download_shot(
    State(state): State<AppState>,
    Path(number): Path<u32>,
) -> ApiResult<Response> {
    let scene = current_scene(&state)?;
    let shot = scene
        .shot_by_number(number)
        .ok_or_else(|| ApiError::not_found(format!("Shot {} not found", number)))?;
    let file = download_one(shot)
        .ok_or_else(|| ApiError::not_found(format!("Shot {} has not been rendered", number)))?;

    attachment(file)
}

/// Download every rendered shot as one ZIP archive.
pub async fn download_scene(State(state): State<AppState>) -> ApiResult<Response> {
    let scene = current_scene(&state)?;
    let file = tokio::task::spawn_blocking(move || download_all(&scene))
        .await
        .map_err(|e| ApiError::internal(format!("Archive task failed: {}", e)))??;

    attachment(file)
}
