//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::{
    download_scene, download_shot, get_generation, health, list_categories, list_images,
    remove_image, reset_generation, start_generation, upload_images,
};
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;
use crate::ws::ws_generation;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let form_routes = Router::new()
        .route("/categories", get(list_categories))
        .route("/images", get(list_images).post(upload_images))
        .route("/images/:index", delete(remove_image));

    let generation_routes = Router::new()
        .route("/generate", post(start_generation))
        .route("/generation", get(get_generation))
        .route("/reset", post(reset_generation));

    let download_routes = Router::new()
        .route("/shots/:number/image", get(download_shot))
        .route("/download", get(download_scene));

    let api_routes = Router::new()
        .merge(form_routes)
        .merge(generation_routes)
        .merge(download_routes);

    let ws_routes = Router::new().route("/ws/generation", get(ws_generation));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health));

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .merge(health_routes)
        // Photo uploads exceed axum's 2MB default; the layer below is the real cap
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
