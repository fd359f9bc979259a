//! API integration tests against a scripted scene service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use shotlist_api::{create_router, ApiConfig, AppState};
use shotlist_genai::{GenAiError, GenAiResult, SceneService};
use shotlist_models::{ProductCategory, RenderedImage, SceneData, Shot, UploadedImage};

const BOUNDARY: &str = "shotlist-test-boundary";

/// Plans two shots and renders each as a tiny JPEG. Optionally never answers
/// the plan call.
struct FakeService {
    hang_on_plan: bool,
    fail_plan: bool,
    shot_types: [&'static str; 2],
}

#[async_trait]
impl SceneService for FakeService {
    async fn request_scene_plan(
        &self,
        _category: ProductCategory,
        _style: &str,
        _images: &[UploadedImage],
    ) -> GenAiResult<SceneData> {
        if self.hang_on_plan {
            std::future::pending::<()>().await;
        }
        if self.fail_plan {
            return Err(GenAiError::plan("not json"));
        }
        Ok(SceneData::new(
            "bath/loft",
            "Loft bathroom",
            "TWIN: clawfoot tub",
            vec![
                Shot::new(1, self.shot_types[0], "TWIN: wide"),
                Shot::new(2, self.shot_types[1], "TWIN: feet"),
            ],
        ))
    }

    async fn request_shot_image(&self, _prompt: &str, _shot_type: &str) -> GenAiResult<RenderedImage> {
        Ok(RenderedImage::jpeg(vec![0xFF, 0xD8, 0xFF, 0xD9]))
    }
}

fn test_state(service: FakeService) -> AppState {
    AppState::with_service(ApiConfig::default(), Arc::new(service))
}

fn ready_service() -> FakeService {
    FakeService {
        hang_on_plan: false,
        fail_plan: false,
        shot_types: ["Lifestyle Wide", "Hero Detail"],
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn upload(files: &[(&str, &str, &str)]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, content_type, contents) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(contents.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/images")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn wait_until_settled(state: &AppState) {
    let mut rx = state.orchestrator.subscribe();
    tokio::time::timeout(
        Duration::from_secs(5),
        rx.wait_for(|s| !s.status.is_busy()),
    )
    .await
    .unwrap()
    .unwrap();
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(test_state(ready_service()));

    let (status, json) = send_json(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["generation"], "idle");
    assert_eq!(json["epoch"], 0);
    assert_eq!(json["uploadedImages"], 0);
    assert_eq!(json["feedSubscribers"], 0);
}

#[tokio::test]
async fn test_health_reports_session() {
    let state = test_state(FakeService {
        hang_on_plan: true,
        ..ready_service()
    });
    let app = create_router(state.clone());
    send(&app, upload(&[("a.png", "image/png", "a"), ("b.jpg", "image/jpeg", "b")])).await;
    let (status, _) = send_json(&app, post_json("/api/generate", serde_json::json!({}))).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let _feed = state.orchestrator.subscribe();
    let (_, json) = send_json(&app, get("/healthz")).await;
    assert_eq!(json["generation"], "planning_scene");
    assert_eq!(json["epoch"], 1);
    assert_eq!(json["uploadedImages"], 2);
    assert_eq!(json["feedSubscribers"], 1);
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = create_router(test_state(ready_service()));
    let response = app.oneshot(get("/healthz")).await.unwrap();

    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_categories() {
    let app = create_router(test_state(ready_service()));

    let (status, json) = send_json(&app, get("/api/categories")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["categories"].as_array().unwrap().len(), 20);
    assert_eq!(json["defaultCategory"], "Bathtubs");
    assert_eq!(
        json["defaultStyle"],
        "Modern Minimalist with natural wood accents"
    );
}

#[tokio::test]
async fn test_upload_list_and_remove_images() {
    let app = create_router(test_state(ready_service()));

    let (status, json) = send_json(
        &app,
        upload(&[
            ("front.png", "image/png", "png-bytes"),
            ("notes.txt", "text/plain", "hello"),
            ("side.jpg", "image/jpeg", "jpg-bytes"),
        ]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["accepted"], 2);
    assert_eq!(json["rejected"][0]["fileName"], "notes.txt");
    assert_eq!(json["images"].as_array().unwrap().len(), 2);

    let (_, list) = send_json(&app, get("/api/images")).await;
    assert_eq!(list[1]["mediaType"], "image/jpeg");

    let delete = Request::builder()
        .method("DELETE")
        .uri("/api/images/0")
        .body(Body::empty())
        .unwrap();
    let (status, remaining) = send_json(&app, delete).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(remaining.as_array().unwrap().len(), 1);
    assert_eq!(remaining[0]["mediaType"], "image/jpeg");

    let delete = Request::builder()
        .method("DELETE")
        .uri("/api/images/5")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send_json(&app, delete).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["detail"].as_str().unwrap().contains("out of range"));
}

#[tokio::test]
async fn test_generate_requires_images() {
    let app = create_router(test_state(ready_service()));

    let (status, json) = send_json(&app, post_json("/api/generate", serde_json::json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].as_str().unwrap().contains("product image"));
}

#[tokio::test]
async fn test_generate_rejects_unknown_category() {
    let app = create_router(test_state(ready_service()));
    send(&app, upload(&[("a.png", "image/png", "a")])).await;

    let (status, _) = send_json(
        &app,
        post_json("/api/generate", serde_json::json!({ "category": "Hot Tubs" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_and_download() {
    let state = test_state(ready_service());
    let app = create_router(state.clone());

    // Nothing to download before a run
    let (status, _) = send(&app, get("/api/download")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, upload(&[("a.png", "image/png", "a")])).await;

    let (status, json) = send_json(
        &app,
        post_json(
            "/api/generate",
            serde_json::json!({ "category": "bathtubs", "style": "Japandi" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["epoch"], 1);
    assert_eq!(json["generation"]["status"]["state"], "planning_scene");

    wait_until_settled(&state).await;

    let (status, json) = send_json(&app, get("/api/generation")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"]["state"], "complete");
    assert_eq!(json["scene"]["renderedCount"], 2);
    assert_eq!(json["scene"]["shots"][0]["aspectRatio"], "4:3");
    assert_eq!(json["scene"]["shots"][1]["hasImage"], true);

    let response = app.clone().oneshot(get("/api/shots/1/image")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"01_Lifestyle-Wide.jpg\""
    );

    let (status, _) = send(&app, get("/api/shots/9/image")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = app.clone().oneshot(get("/api/download")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/zip");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"bath-loft.zip\""
    );
}

#[tokio::test]
async fn test_generate_conflict_while_running() {
    let state = test_state(FakeService {
        hang_on_plan: true,
        ..ready_service()
    });
    let app = create_router(state);
    send(&app, upload(&[("a.png", "image/png", "a")])).await;

    let (status, _) = send(&app, post_json("/api/generate", serde_json::json!({}))).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, _) = send(&app, post_json("/api/generate", serde_json::json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Reset frees the session even though the plan call never returns
    let (status, json) = send_json(&app, post_json("/api/reset", serde_json::json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"]["state"], "idle");

    let (_, images) = send_json(&app, get("/api/images")).await;
    assert!(images.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_plan_failure_reported_in_snapshot() {
    let state = test_state(FakeService {
        fail_plan: true,
        ..ready_service()
    });
    let app = create_router(state.clone());
    send(&app, upload(&[("a.png", "image/png", "a")])).await;

    send(&app, post_json("/api/generate", serde_json::json!({}))).await;
    wait_until_settled(&state).await;

    let (_, json) = send_json(&app, get("/api/generation")).await;
    assert_eq!(json["status"]["state"], "error");
    assert!(json.get("scene").is_none());
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to generate scene prompts"));
}

#[tokio::test]
async fn test_download_names_are_cleaned() {
    let state = test_state(FakeService {
        shot_types: ["Detail\nClose-up", "../../etc/evil"],
        ..ready_service()
    });
    let app = create_router(state.clone());
    send(&app, upload(&[("a.png", "image/png", "a")])).await;
    send(&app, post_json("/api/generate", serde_json::json!({}))).await;
    wait_until_settled(&state).await;

    let response = app.clone().oneshot(get("/api/shots/1/image")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"01_Detail-Close-up.jpg\""
    );

    let response = app.clone().oneshot(get("/api/shots/2/image")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"02_..-..-etc-evil.jpg\""
    );
}
