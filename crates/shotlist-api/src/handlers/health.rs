//! Health check handlers.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

/// Liveness plus a summary of the single generation session.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    /// Current generation state, e.g. `idle` or `rendering_shots`
    pub generation: &'static str,
    pub epoch: u64,
    pub uploaded_images: usize,
    /// Open progress feeds
    pub feed_subscribers: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.orchestrator.snapshot();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339(),
        generation: snapshot.status.as_str(),
        epoch: snapshot.epoch,
        uploaded_images: state.intake.len().await,
        feed_subscribers: state.orchestrator.subscriber_count(),
    })
}
