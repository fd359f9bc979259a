//! Generation control handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use shotlist_models::{FormState, ProductCategory, SnapshotView, DEFAULT_STYLE};
use shotlist_pipeline::RunOutcome;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Submit request. Images come from the intake list.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    /// Category label, matched case-insensitively
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub epoch: u64,
    pub generation: SnapshotView,
}

/// Start a run in the background and return immediately.
pub async fn start_generation(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<(StatusCode, Json<GenerateResponse>)> {
    let category = match request.category.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => label
            .parse::<ProductCategory>()
            .map_err(|e| ApiError::bad_request(e.to_string()))?,
        _ => ProductCategory::default(),
    };

    let style = match request.style {
        Some(style) if style.trim().is_empty() => {
            return Err(ApiError::bad_request("Style must not be empty"));
        }
        Some(style) => style.trim().to_string(),
        None => DEFAULT_STYLE.to_string(),
    };

    let images = state.intake.images().await;
    if images.is_empty() {
        return Err(ApiError::bad_request("Upload at least one product image first"));
    }

    let epoch = state.orchestrator.submit()?;
    let form = FormState::new(category, style).with_images(images);

    info!(epoch, category = %category, images = form.images.len(), "Generation submitted");

    let orchestrator = state.orchestrator.clone();
    tokio::spawn(async move {
        match orchestrator.run(epoch, form).await {
            Ok(RunOutcome::Completed { scene_id, rendered }) => {
                info!(epoch, scene_id = %scene_id, rendered, "Generation finished");
            }
            Ok(RunOutcome::Superseded) => info!(epoch, "Generation superseded"),
            Err(e) => warn!(epoch, error = %e, "Generation failed"),
        }
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(GenerateResponse {
            epoch,
            generation: state.orchestrator.snapshot().view(),
        }),
    ))
}

/// Current generation state.
pub async fn get_generation(State(state): State<AppState>) -> Json<SnapshotView> {
    Json(state.orchestrator.snapshot().view())
}

/// Return to the empty form: generation back to idle, intake cleared.
pub async fn reset_generation(State(state): State<AppState>) -> Json<SnapshotView> {
    let epoch = state.orchestrator.reset();
    state.intake.clear().await;
    info!(epoch, "Session reset");
    Json(state.orchestrator.snapshot().view())
}
