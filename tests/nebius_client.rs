//! HTTP contract tests for the Nebius provider client.

use httpmock::prelude::*;
use serde_json::json;

use preggo_rag::providers::{Embedder, Generator, NebiusClient};
use preggo_rag::types::RagError;

fn client(server: &MockServer) -> NebiusClient {
    NebiusClient::new("test-key", server.base_url(), "chat-model", "embed-model")
}

#[tokio::test]
async fn embeddings_are_restored_to_input_order() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/embeddings")
                .header("authorization", "Bearer test-key");
            then.status(200).json_body(json!({
                "data": [
                    {"embedding": [0.1, 0.2], "index": 1},
                    {"embedding": [0.3, 0.4], "index": 0}
                ]
            }));
        })
        .await;

    let embeddings = client(&server)
        .embed_batch(&["first".to_string(), "second".to_string()])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(embeddings, vec![vec![0.3, 0.4], vec![0.1, 0.2]]);
}

#[tokio::test]
async fn empty_batch_skips_the_network() {
    let server = MockServer::start_async().await;
    let embeddings = client(&server).embed_batch(&[]).await.unwrap();
    assert!(embeddings.is_empty());
}

#[tokio::test]
async fn embedding_count_mismatch_is_a_provider_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/embeddings");
            then.status(200)
                .json_body(json!({"data": [{"embedding": [0.1], "index": 0}]}));
        })
        .await;

    let err = client(&server)
        .embed_batch(&["one".to_string(), "two".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, RagError::Provider(_)));
}

#[tokio::test]
async fn generation_extracts_the_message_content() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer test-key");
            then.status(200).json_body(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "Rest and hydrate — you've got this."}}
                ]
            }));
        })
        .await;

    let answer = client(&server).generate("rendered prompt").await.unwrap();

    mock.assert_async().await;
    assert_eq!(answer, "Rest and hydrate — you've got this.");
}

#[tokio::test]
async fn upstream_failure_carries_status_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(500).body("model overloaded");
        })
        .await;

    let err = client(&server).generate("prompt").await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("500"));
    assert!(message.contains("model overloaded"));
}

#[tokio::test]
async fn malformed_completion_payload_is_a_provider_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;

    let err = client(&server).generate("prompt").await.unwrap_err();
    assert!(err.to_string().contains("choices[0].message.content"));
}
