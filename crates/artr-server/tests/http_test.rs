//! Router tests driven through `tower::ServiceExt::oneshot`, no listener.

use std::sync::Arc;

use artr_app::CodecModule;
use artr_core::{ModuleSnapshot, NOT_READY_MESSAGE};
use artr_server::{AppState, RenderOptions, router};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use tokio::sync::watch;
use tower::ServiceExt;

fn app(snapshot: ModuleSnapshot) -> (watch::Sender<ModuleSnapshot>, Router) {
    let (publisher, modules) = watch::channel(snapshot);
    (publisher, router(AppState::new(modules, RenderOptions::default())))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn post_transform(router: Router, body: &str) -> serde_json::Value {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/transform")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_str(&body_string(response).await).unwrap()
}

#[tokio::test]
async fn module_state_follows_publisher() {
    let (publisher, router) = app(ModuleSnapshot::Loading);

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/api/module").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_string(response).await, r#"{"state":"loading"}"#);

    publisher.send_replace(ModuleSnapshot::Ready(Arc::new(CodecModule)));

    let response = router
        .oneshot(Request::builder().uri("/api/module").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_string(response).await, r#"{"state":"ready"}"#);
}

#[tokio::test]
async fn transform_before_ready_is_failure() {
    let (_publisher, router) = app(ModuleSnapshot::Loading);

    let json = post_transform(router, r#"{"direction":"encode","text":"hello"}"#).await;

    assert_eq!(json["status"], "failure");
    assert_eq!(json["message"], NOT_READY_MESSAGE);
}

#[tokio::test]
async fn transform_encodes_when_ready() {
    let (_publisher, router) = app(ModuleSnapshot::Ready(Arc::new(CodecModule)));

    let json = post_transform(router, r#"{"direction":"encode","text":"A"}"#).await;

    assert_eq!(json, serde_json::json!({ "status": "success", "text": "愛楽愛" }));
}

#[tokio::test]
async fn transform_reports_decode_rejection() {
    let (_publisher, router) = app(ModuleSnapshot::Ready(Arc::new(CodecModule)));

    let json = post_transform(router, r#"{"direction":"decode","text":"楽可"}"#).await;

    assert_eq!(json["status"], "failure");
    assert_eq!(json["message"], "長さが足りません");
}

#[tokio::test]
async fn unknown_direction_is_rejected() {
    let (_publisher, router) = app(ModuleSnapshot::Ready(Arc::new(CodecModule)));

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/transform")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"direction":"sideways","text":""}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn index_streams_styled_page() {
    let (_publisher, router) = app(ModuleSnapshot::Loading);

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");

    let html = body_string(response).await;
    assert!(html.starts_with("<!DOCTYPE html>"));
    let style_at = html.find(r#"<style data-emotion="mui "#).unwrap();
    assert!(style_at < html.find("</head>").unwrap());
    assert!(html.contains(r#"data-module="loading""#));
    assert!(html.contains("🤫 建前化"));
    assert!(html.ends_with("</html>"));
}
