//! Scene plan and shot definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{AspectRatio, RenderedImage};

/// One planned shot of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shot {
    /// 1-based position, unique within the scene
    pub sequence_number: u32,
    /// Category label, e.g. "Lifestyle Wide Shot"
    pub shot_type: String,
    /// Full instruction sent to the renderer
    pub prompt_text: String,
    /// Present once the render call has succeeded
    #[serde(skip)]
    pub rendered_image: Option<RenderedImage>,
}

impl Shot {
    pub fn new(sequence_number: u32, shot_type: impl Into<String>, prompt_text: impl Into<String>) -> Self {
        Self {
            sequence_number,
            shot_type: shot_type.into(),
            prompt_text: prompt_text.into(),
            rendered_image: None,
        }
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered_image.is_some()
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        AspectRatio::for_shot_type(&self.shot_type)
    }
}

/// A generated scene: the product twin description plus its shot list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SceneData {
    pub scene_id: String,
    pub master_scene_description: String,
    pub master_product_description: String,
    pub shots: Vec<Shot>,
}

impl SceneData {
    /// Build a scene with every shot unrendered and ordered by sequence number.
    pub fn new(
        scene_id: impl Into<String>,
        master_scene_description: impl Into<String>,
        master_product_description: impl Into<String>,
        shots: Vec<Shot>,
    ) -> Self {
        let mut shots: Vec<Shot> = shots
            .into_iter()
            .map(|shot| Shot {
                rendered_image: None,
                ..shot
            })
            .collect();
        shots.sort_by_key(|s| s.sequence_number);

        Self {
            scene_id: scene_id.into(),
            master_scene_description: master_scene_description.into(),
            master_product_description: master_product_description.into(),
            shots,
        }
    }

    pub fn shot_count(&self) -> usize {
        self.shots.len()
    }

    /// Shots whose image is ready, in order.
    pub fn completed_shots(&self) -> impl Iterator<Item = &Shot> {
        self.shots.iter().filter(|s| s.is_rendered())
    }

    pub fn rendered_count(&self) -> usize {
        self.completed_shots().count()
    }

    pub fn is_fully_rendered(&self) -> bool {
        self.shots.iter().all(Shot::is_rendered)
    }

    pub fn shot_by_number(&self, sequence_number: u32) -> Option<&Shot> {
        self.shots.iter().find(|s| s.sequence_number == sequence_number)
    }

    /// Copy of this scene with the image of shot `index` filled in.
    ///
    /// Returns `None` when the index is out of range or the shot already has
    /// an image; a rendered image is set exactly once.
    pub fn with_rendered_image(&self, index: usize, image: RenderedImage) -> Option<SceneData> {
        let target = self.shots.get(index)?;
        if target.is_rendered() {
            return None;
        }

        let shots = self
            .shots
            .iter()
            .enumerate()
            .map(|(i, shot)| {
                if i == index {
                    Shot {
                        rendered_image: Some(image.clone()),
                        ..shot.clone()
                    }
                } else {
                    shot.clone()
                }
            })
            .collect();

        Some(SceneData {
            scene_id: self.scene_id.clone(),
            master_scene_description: self.master_scene_description.clone(),
            master_product_description: self.master_product_description.clone(),
            shots,
        })
    }
}
