//! Wire types for the Gemini and Imagen endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shotlist_models::{SceneData, Shot};
use std::collections::HashSet;

use crate::error::{GenAiError, GenAiResult};

// ============================================================================
// generateContent (planning)
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated.
    pub fn first_text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// ============================================================================
// predict (rendering)
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
pub(crate) struct PredictInstance {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PredictParameters {
    pub sample_count: u32,
    pub aspect_ratio: String,
    pub output_options: OutputOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OutputOptions {
    pub mime_type: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Prediction {
    pub bytes_base64_encoded: Option<String>,
    pub mime_type: Option<String>,
    pub rai_filtered_reason: Option<String>,
}

// ============================================================================
// Scene plan contract
// ============================================================================

/// Scene plan exactly as the planner returns it. All fields are mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePlan {
    pub scene_id: String,
    pub master_scene_description: String,
    pub master_product_description: String,
    pub shot_sequence: Vec<PlannedShot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedShot {
    pub shot_number: u32,
    pub shot_type: String,
    pub prompt: String,
}

impl ScenePlan {
    /// Parse planner output, tolerating a surrounding markdown code fence.
    pub fn parse(text: &str) -> GenAiResult<Self> {
        let text = strip_code_fence(text);
        serde_json::from_str(text)
            .map_err(|e| GenAiError::plan(format!("Failed to parse scene plan JSON: {}", e)))
    }

    /// Validate and convert into a scene with no rendered images.
    ///
    /// Shot numbers must be positive and unique; download names depend on it.
    pub fn into_scene(self) -> GenAiResult<SceneData> {
        let mut seen = HashSet::new();
        for shot in &self.shot_sequence {
            if shot.shot_number == 0 {
                return Err(GenAiError::plan("Scene plan contains shot number 0"));
            }
            if !seen.insert(shot.shot_number) {
                return Err(GenAiError::plan(format!(
                    "Scene plan repeats shot number {}",
                    shot.shot_number
                )));
            }
        }

        let shots = self
            .shot_sequence
            .into_iter()
            .map(|s| Shot::new(s.shot_number, s.shot_type, s.prompt))
            .collect();

        Ok(SceneData::new(
            self.scene_id,
            self.master_scene_description,
            self.master_product_description,
            shots,
        ))
    }
}

fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}
