//! Generation state observed by the presentation layer.
//!
//! The orchestrator publishes a fresh [`GenerationSnapshot`] on every state
//! change. Views strip image bytes so snapshots can be sent as JSON.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{AspectRatio, MediaType, SceneData, Shot};

/// Pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GenerationStatus {
    /// Nothing submitted, or reset
    #[default]
    Idle,
    /// Waiting for the scene plan
    PlanningScene,
    /// Rendering shot `index` (0-based) of `total`
    RenderingShots { index: usize, total: usize },
    /// Every shot rendered
    Complete,
    /// The run stopped on a plan or image failure
    Error,
}

impl GenerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStatus::Idle => "idle",
            GenerationStatus::PlanningScene => "planning_scene",
            GenerationStatus::RenderingShots { .. } => "rendering_shots",
            GenerationStatus::Complete => "complete",
            GenerationStatus::Error => "error",
        }
    }

    /// A run is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            GenerationStatus::PlanningScene | GenerationStatus::RenderingShots { .. }
        )
    }

    /// No more updates expected until the next submit or reset.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationStatus::Complete | GenerationStatus::Error)
    }
}

impl std::fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationStatus::RenderingShots { index, total } => {
                write!(f, "rendering_shots({}/{})", index + 1, total)
            }
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Full generation state at one point in time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationSnapshot {
    /// Run counter; bumped by every submit and reset
    pub epoch: u64,
    pub status: GenerationStatus,
    pub progress_label: Option<String>,
    pub scene: Option<SceneData>,
    pub error: Option<String>,
}

impl GenerationSnapshot {
    /// Idle state for the given epoch.
    pub fn idle(epoch: u64) -> Self {
        Self {
            epoch,
            ..Self::default()
        }
    }

    pub fn is_busy(&self) -> bool {
        self.status.is_busy()
    }

    pub fn view(&self) -> SnapshotView {
        SnapshotView::from(self)
    }
}

/// Serializable projection of a [`GenerationSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotView {
    pub epoch: u64,
    pub status: GenerationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<SceneView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SceneView {
    pub scene_id: String,
    pub master_scene_description: String,
    pub master_product_description: String,
    pub rendered_count: usize,
    pub shots: Vec<ShotView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShotView {
    pub sequence_number: u32,
    pub shot_type: String,
    pub prompt_text: String,
    pub aspect_ratio: AspectRatio,
    pub has_image: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
}

impl From<&Shot> for ShotView {
    fn from(shot: &Shot) -> Self {
        Self {
            sequence_number: shot.sequence_number,
            shot_type: shot.shot_type.clone(),
            prompt_text: shot.prompt_text.clone(),
            aspect_ratio: shot.aspect_ratio(),
            has_image: shot.is_rendered(),
            media_type: shot.rendered_image.as_ref().map(|i| i.media_type()),
        }
    }
}

impl From<&SceneData> for SceneView {
    fn from(scene: &SceneData) -> Self {
        Self {
            scene_id: scene.scene_id.clone(),
            master_scene_description: scene.master_scene_description.clone(),
            master_product_description: scene.master_product_description.clone(),
            rendered_count: scene.rendered_count(),
            shots: scene.shots.iter().map(ShotView::from).collect(),
        }
    }
}

impl From<&GenerationSnapshot> for SnapshotView {
    fn from(snapshot: &GenerationSnapshot) -> Self {
        Self {
            epoch: snapshot.epoch,
            status: snapshot.status,
            progress_label: snapshot.progress_label.clone(),
            scene: snapshot.scene.as_ref().map(SceneView::from),
            error: snapshot.error.clone(),
        }
    }
}
