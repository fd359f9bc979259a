//! Axum HTTP/WS front end.
//!
//! This crate provides:
//! - Product photo upload and the category/style form
//! - Generation control (submit, progress, reset) over REST and WebSocket
//! - Single-shot and whole-scene downloads

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod ws;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
