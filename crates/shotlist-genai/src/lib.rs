//! Client for the generative-AI backend.
//!
//! Two remote operations sit behind the [`SceneService`] trait:
//! - scene planning (Gemini `generateContent` with a JSON response schema)
//! - shot rendering (Imagen `predict`)
//!
//! Both are single request/response round trips with no retry, caching or
//! concurrency limiting.

pub mod client;
pub mod config;
pub mod error;
pub mod prompt;
pub mod service;
pub mod types;

pub use client::GeminiClient;
pub use config::GenAiConfig;
pub use error::{GenAiError, GenAiResult};
pub use service::SceneService;
pub use types::{PlannedShot, ScenePlan};
