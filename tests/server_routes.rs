//! Router-level tests driving the HTTP handlers end to end with fakes.

mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::{FakeGenerator, FakeStore};
use preggo_rag::chat::{ChatService, default_style_meta};
use preggo_rag::providers::MockEmbedder;
use preggo_rag::server::{AppState, build_router};
use preggo_rag::store::Collection;

fn router(store: Arc<FakeStore>, generator: Arc<FakeGenerator>) -> Router {
    let chat = ChatService::new(Arc::new(MockEmbedder::new()), generator, store);
    build_router(AppState {
        chat: Arc::new(chat),
    })
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn style_add_without_text_returns_500_with_error() {
    let store = Arc::new(FakeStore::default());
    let app = router(store.clone(), Arc::new(FakeGenerator::default()));

    let response = app
        .oneshot(post_json("/style/add", r#"{"meta": {"tone": "upbeat"}}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(!message.is_empty());
    assert!(message.contains("text"));
    assert!(store.documents(Collection::StyleExemplars).is_empty());
}

#[tokio::test]
async fn style_add_stores_the_exemplar_and_reports_ok() {
    let store = Arc::new(FakeStore::default());
    let app = router(store.clone(), Arc::new(FakeGenerator::default()));

    let response = app
        .oneshot(post_json("/style/add", r#"{"text": "breathe slowly"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!({"status": "ok"}));

    let stored = store.documents(Collection::StyleExemplars);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].content, "breathe slowly");
    assert_eq!(stored[0].metadata, default_style_meta());
}

#[tokio::test]
async fn chat_returns_the_generated_answer() {
    let store = Arc::new(FakeStore::default());
    let generator = Arc::new(FakeGenerator::default());
    let app = router(store, generator.clone());

    let response = app
        .oneshot(post_json("/chat", r#"{"message": "is spotting normal?"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["answer"].as_str().unwrap(), generator.reply);
}
