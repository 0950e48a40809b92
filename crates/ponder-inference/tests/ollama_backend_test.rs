//! Integration tests for the Ollama chat backend against a stub HTTP server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ponder_core::{ChatBackend, Error};
use ponder_inference::OllamaBackend;

async fn backend_for(server: &MockServer) -> OllamaBackend {
    OllamaBackend::with_config(server.uri(), "llama3.2:3b".to_string()).unwrap()
}

#[tokio::test]
async fn generate_returns_response_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({"model": "llama3.2:3b", "stream": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.2:3b",
            "response": "Dogs seem best.",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server).await;
    let response = backend.generate("which animal is best").await.unwrap();
    assert_eq!(response, "Dogs seem best.");
}

#[tokio::test]
async fn generate_with_system_sends_system_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({"system": "be terse"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "ok"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server).await;
    let response = backend
        .generate_with_system("be terse", "hello")
        .await
        .unwrap();
    assert_eq!(response, "ok");
}

#[tokio::test]
async fn http_error_status_is_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&server)
        .await;

    let backend = backend_for(&server).await;
    let result = backend.generate("anything").await;
    match result {
        Err(Error::Request(msg)) => assert!(msg.contains("500")),
        other => panic!("Expected Request error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let backend = backend_for(&server).await;
    let result = backend.generate("anything").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": "late"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    std::env::set_var("PONDER_CHAT_TIMEOUT_SECS", "1");
    let backend = OllamaBackend::with_config(server.uri(), "llama3.2:3b".to_string()).unwrap();
    std::env::remove_var("PONDER_CHAT_TIMEOUT_SECS");

    let result = backend.generate("anything").await;
    assert!(matches!(result, Err(Error::Request(_))));
}
