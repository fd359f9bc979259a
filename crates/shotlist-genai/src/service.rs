//! Remote operations used by the generation pipeline.

use async_trait::async_trait;
use shotlist_models::{ProductCategory, RenderedImage, SceneData, UploadedImage};

use crate::error::GenAiResult;

/// Plan and render operations of the generative-AI backend.
///
/// Each call is an independent, stateless round trip.
#[async_trait]
pub trait SceneService: Send + Sync {
    /// Ask the planner for a scene and its shot list.
    ///
    /// The returned scene has no rendered images. Fails with
    /// `GenAiError::PlanGeneration` if the response does not match the plan shape.
    async fn request_scene_plan(
        &self,
        category: ProductCategory,
        style: &str,
        images: &[UploadedImage],
    ) -> GenAiResult<SceneData>;

    /// Render one shot. The aspect ratio is derived from `shot_type`.
    async fn request_shot_image(&self, prompt_text: &str, shot_type: &str) -> GenAiResult<RenderedImage>;
}
