//! Shared data models for the shotlist scene generator.
//!
//! This crate provides Serde-serializable types for:
//! - Uploaded product images and their media types
//! - Product categories and the submission form
//! - Scene plans, shots and rendered images
//! - The generation state snapshot observed by the presentation layer

pub mod aspect;
pub mod category;
pub mod generation;
pub mod image;
pub mod scene;

// Re-export common types
pub use aspect::{AspectRatio, AspectRatioParseError};
pub use category::{CategoryParseError, FormState, ProductCategory, DEFAULT_STYLE};
pub use generation::{GenerationSnapshot, GenerationStatus, SceneView, ShotView, SnapshotView};
pub use image::{MediaType, MediaTypeParseError, RenderedImage, UploadedImage};
pub use scene::{SceneData, Shot};
