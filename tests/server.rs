//! HTTP API driven through the router without binding a socket.

mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tower::ServiceExt;

use common::{MockTransport, RecordingSleep, predictions, studio};
use flyerforge::config::StudioConfig;
use flyerforge::server::{AppState, router};

fn app_with_config(transport: &Arc<MockTransport>, config: StudioConfig) -> Router {
    let sleeper = RecordingSleep::new();
    let state = AppState::new(config, studio(transport, &sleeper));
    router(Arc::new(state))
}

fn app(transport: &Arc<MockTransport>) -> Router {
    app_with_config(transport, StudioConfig::default())
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_design_snapshot_defaults() {
    let app = app(&MockTransport::new());
    let (status, body) = send_json(&app, Request::get("/api/design").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["design"]["title"], "Title");
    assert_eq!(body["background"]["kind"], "default");
    assert_eq!(body["defaultBackground"], "#0B2349");
    assert_eq!(body["elementPositions"]["logo-top"], serde_json::json!({"x": 310, "y": 20}));
    assert_eq!(body["generationConfigured"], false);
}

#[tokio::test]
async fn test_design_reports_configured_key() {
    let config = StudioConfig {
        api_key: "secret".to_string(),
        ..StudioConfig::default()
    };
    let app = app_with_config(&MockTransport::new(), config);
    let (_, body) = send_json(&app, Request::get("/api/design").body(Body::empty()).unwrap()).await;
    assert_eq!(body["generationConfigured"], true);
    assert!(!body.to_string().contains("secret"));
}

#[tokio::test]
async fn test_text_update_is_rendered() {
    let app = app(&MockTransport::new());
    let (status, body) = send_json(&app, post_json("/api/design/text", serde_json::json!({"title": "RustConf"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["design"]["title"], "RustConf");
    assert_eq!(body["design"]["subtitle"], "Subtitle");

    let (status, svg) = send(&app, Request::get("/api/render/front").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(svg).unwrap().contains("RustConf"));
}

#[tokio::test]
async fn test_pointer_drag_and_reset() {
    let app = app(&MockTransport::new());

    let down = serde_json::json!({"type": "down", "target": "header-top", "x": 30, "y": 30});
    let (_, body) = send_json(&app, post_json("/api/pointer/front", down)).await;
    assert_eq!(body["dragging"], "header-top");

    let (_, body) = send_json(&app, post_json("/api/pointer/front", serde_json::json!({"type": "move", "x": 50, "y": 70}))).await;
    assert_eq!(body["elementPositions"]["header-top"], serde_json::json!({"x": 40, "y": 64}));

    let (_, body) = send_json(&app, post_json("/api/pointer/front", serde_json::json!({"type": "up", "x": 50, "y": 70}))).await;
    assert_eq!(body["dragging"], serde_json::Value::Null);

    let (_, body) = send_json(&app, post_empty("/api/positions/reset")).await;
    assert_eq!(body["elementPositions"]["header-top"], serde_json::json!({"x": 20, "y": 24}));
}

#[tokio::test]
async fn test_unknown_face_is_rejected() {
    let app = app(&MockTransport::new());
    let (status, _) = send(&app, post_json("/api/pointer/side", serde_json::json!({"type": "up", "x": 0, "y": 0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Request::get("/api/render/side").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generate_and_select() {
    let transport = MockTransport::new();
    transport.reply(200, predictions(4));
    let app = app(&transport);

    let (status, body) = send_json(&app, post_json("/api/generate", serde_json::json!({"prompt": "neon grid"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 4);
    assert_eq!(body["background"]["index"], 0);
    assert_eq!(transport.requests()[0].1["instances"][0]["prompt"], "neon grid");

    let (status, body) = send_json(&app, post_empty("/api/background/select/3")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["background"]["image"], "data:image/png;base64,IMG3");

    let (status, _) = send(&app, post_empty("/api/background/select/9")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_prompt_is_bad_request() {
    let transport = MockTransport::new();
    let app = app(&transport);

    let (status, body) = send_json(&app, post_json("/api/generate", serde_json::json!({"prompt": " "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter an image theme (prompt).");
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_email_failure_maps_to_bad_gateway() {
    let transport = MockTransport::new();
    transport.reply(500, serde_json::json!({"message": "SMTP down"}));
    let app = app(&transport);

    let (status, body) = send_json(&app, post_json("/api/email", serde_json::json!({"email": "a@b.c"}))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "SMTP down");

    let (_, body) = send_json(&app, Request::get("/api/design").body(Body::empty()).unwrap()).await;
    assert_eq!(body["error"], "SMTP down");
    assert_eq!(body["emailAddress"], "a@b.c");
}

#[tokio::test]
async fn test_save_returns_backend_reply() {
    let transport = MockTransport::new();
    transport.reply(200, serde_json::json!({"id": 42}));
    let app = app(&transport);

    let (status, body) = send_json(&app, post_empty("/api/save")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["id"], 42);
}

#[tokio::test]
async fn test_logo_multipart_upload() {
    let app = app(&MockTransport::new());
    let boundary = "XBOUNDARY";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"logo.svg\"\r\n\
         Content-Type: image/svg+xml\r\n\r\n<svg/>\r\n--{b}--\r\n",
        b = boundary
    );
    let request = Request::post("/api/logo")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stored"], true);

    let (_, body) = send_json(&app, Request::get("/api/design").body(Body::empty()).unwrap()).await;
    assert!(body["design"]["uploadedLogo"].as_str().unwrap().starts_with("data:image/svg+xml;base64,"));
}

#[tokio::test]
async fn test_export_page_prints() {
    let app = app(&MockTransport::new());
    let (status, html) = send(&app, Request::get("/export").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(html).unwrap();
    assert!(html.contains("window.print()"));
    assert!(html.contains("flyer-front"));
}
