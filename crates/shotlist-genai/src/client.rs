//! Gemini / Imagen HTTP client.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use tracing::{debug, info, warn};

use shotlist_models::{AspectRatio, MediaType, ProductCategory, RenderedImage, SceneData, UploadedImage};

use crate::config::GenAiConfig;
use crate::error::{GenAiError, GenAiResult};
use crate::prompt::{scene_plan_input, scene_plan_schema, SCENE_PLAN_INSTRUCTION};
use crate::service::SceneService;
use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData,
    OutputOptions, Part, PredictInstance, PredictParameters, PredictRequest, PredictResponse, ScenePlan,
};

const API_KEY_HEADER: &str = "x-goog-api-key";
const MAX_ERROR_BODY: usize = 200;

/// Client for the Generative Language API.
pub struct GeminiClient {
    http: Client,
    config: GenAiConfig,
}

impl GeminiClient {
    /// Create a new client.
    pub fn new(config: GenAiConfig) -> GenAiResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(GenAiError::config("Gemini API key is required"));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenAiError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> GenAiResult<Self> {
        Self::new(GenAiConfig::from_env()?)
    }

    pub fn config(&self) -> &GenAiConfig {
        &self.config
    }

    fn build_plan_request(
        category: ProductCategory,
        style: &str,
        images: &[UploadedImage],
    ) -> GenerateContentRequest {
        let mut parts = Vec::with_capacity(images.len() + 1);
        parts.push(Part::Text {
            text: scene_plan_input(category, style),
        });
        parts.extend(images.iter().map(|image| Part::InlineData {
            inline_data: InlineData {
                mime_type: image.media_type.as_str().to_string(),
                data: image.encoded_bytes.clone(),
            },
        }));

        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part::Text {
                    text: SCENE_PLAN_INSTRUCTION.trim().to_string(),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: scene_plan_schema(),
            },
        }
    }

    fn build_image_request(prompt_text: &str, aspect_ratio: AspectRatio) -> PredictRequest {
        PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt_text.to_string(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: aspect_ratio.as_str().to_string(),
                output_options: OutputOptions {
                    mime_type: MediaType::Jpeg.as_str().to_string(),
                },
            },
        }
    }

    fn api_key_header(&self) -> GenAiResult<HeaderValue> {
        HeaderValue::from_str(&self.config.api_key)
            .map_err(|e| GenAiError::config(format!("Invalid API key header: {}", e)))
    }

    /// Turn a non-success response into a short error description.
    async fn describe_failure(response: Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        // Truncate error body to avoid leaking request data into logs
        let truncated: String = body.chars().take(MAX_ERROR_BODY).collect();
        format!("API returned {}: {}", status, truncated)
    }
}

#[async_trait]
impl SceneService for GeminiClient {
    async fn request_scene_plan(
        &self,
        category: ProductCategory,
        style: &str,
        images: &[UploadedImage],
    ) -> GenAiResult<SceneData> {
        let url = self.config.plan_url();
        let request = Self::build_plan_request(category, style, images);

        info!(
            model = %self.config.plan_model,
            category = %category,
            image_count = images.len(),
            "Requesting scene plan"
        );

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(API_KEY_HEADER, self.api_key_header()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenAiError::plan(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let detail = Self::describe_failure(response).await;
            warn!("Scene plan request rejected: {}", detail);
            return Err(GenAiError::plan(detail));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenAiError::plan(format!("Failed to parse Gemini response: {}", e)))?;

        let text = body
            .first_text()
            .ok_or_else(|| GenAiError::plan("No content in Gemini response"))?;

        debug!(chars = text.len(), "Received scene plan text");

        let scene = ScenePlan::parse(&text)?.into_scene()?;

        info!(
            scene_id = %scene.scene_id,
            shots = scene.shot_count(),
            "Scene plan received"
        );

        Ok(scene)
    }

    async fn request_shot_image(&self, prompt_text: &str, shot_type: &str) -> GenAiResult<RenderedImage> {
        let url = self.config.image_url();
        let aspect_ratio = AspectRatio::for_shot_type(shot_type);
        let request = Self::build_image_request(prompt_text, aspect_ratio);

        info!(
            model = %self.config.image_model,
            shot_type = %shot_type,
            aspect_ratio = %aspect_ratio,
            prompt_chars = prompt_text.len(),
            "Requesting shot image"
        );

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(API_KEY_HEADER, self.api_key_header()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenAiError::image(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let detail = Self::describe_failure(response).await;
            warn!("Shot image request rejected: {}", detail);
            return Err(GenAiError::image(detail));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| GenAiError::image(format!("Failed to parse Imagen response: {}", e)))?;

        let prediction = body
            .predictions
            .into_iter()
            .find(|p| p.bytes_base64_encoded.is_some());

        let Some(prediction) = prediction else {
            return Err(GenAiError::image("No image was generated"));
        };

        if let Some(reason) = prediction.rai_filtered_reason.as_deref() {
            debug!("Image returned with filter note: {}", reason);
        }

        let encoded = prediction.bytes_base64_encoded.unwrap_or_default();
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| GenAiError::image(format!("Invalid image encoding: {}", e)))?;

        if bytes.is_empty() {
            return Err(GenAiError::image("No image was generated"));
        }

        let media_type = prediction
            .mime_type
            .as_deref()
            .and_then(|m| m.parse().ok())
            .unwrap_or(MediaType::Jpeg);

        Ok(RenderedImage::new(bytes, media_type))
    }
}
