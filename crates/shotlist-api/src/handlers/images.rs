//! Product photo intake handlers.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;
use shotlist_models::{MediaType, UploadedImage};
use shotlist_pipeline::{IncomingFile, IntakeReport};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// One entry of the intake list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub index: usize,
    pub media_type: MediaType,
    /// Length of the base64 payload
    pub encoded_size: usize,
}

fn describe(images: &[UploadedImage]) -> Vec<ImageInfo> {
    images
        .iter()
        .enumerate()
        .map(|(index, image)| ImageInfo {
            index,
            media_type: image.media_type,
            encoded_size: image.encoded_bytes.len(),
        })
        .collect()
}

/// List uploaded photos in order.
pub async fn list_images(State(state): State<AppState>) -> Json<Vec<ImageInfo>> {
    Json(describe(&state.intake.images().await))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(flatten)]
    pub report: IntakeReport,
    pub images: Vec<ImageInfo>,
}

/// Add photos from a multipart form. Every part with a file name is a photo.
pub async fn upload_images(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let media_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read {}: {}", file_name, e)))?;

        files.push(IncomingFile::new(file_name, media_type, bytes.to_vec()));
    }

    if files.is_empty() {
        return Err(ApiError::bad_request("No files in upload"));
    }

    let report = state.intake.add_files(files).await;
    let images = describe(&state.intake.images().await);

    Ok(Json(UploadResponse { report, images }))
}

/// Remove one photo; later photos shift down by one.
pub async fn remove_image(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<Json<Vec<ImageInfo>>> {
    state.intake.remove_image(index).await?;
    info!(index, "Image removed from intake");
    Ok(Json(describe(&state.intake.images().await)))
}
