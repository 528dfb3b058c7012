//! HTTP-level gateway tests against a mock model backend.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bma_gemini::{GatewayError, GeminiClient, GeminiConfig, InferenceModel};

fn test_client(base_url: String) -> GeminiClient {
    GeminiClient::new(GeminiConfig {
        api_key: "test-key".to_string(),
        model: "gemini-2.5-flash".to_string(),
        base_url,
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
    })
    .unwrap()
}

fn generate_path() -> &'static str {
    "/v1beta/models/gemini-2.5-flash:generateContent"
}

#[tokio::test]
async fn test_successful_inference_returns_candidate_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"temas_abordados\": [\"moda\"]}" }] },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(server.uri());
    let schema = bma_models::response_schema();
    let raw = client
        .infer("gs://bucket/uploads/clip.mp4", "analyze", &schema)
        .await
        .unwrap();

    assert_eq!(raw, "{\"temas_abordados\": [\"moda\"]}");
}

#[tokio::test]
async fn test_markdown_fenced_response_is_unwrapped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "```json\n{\"a\": 1}\n```" }] }
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(server.uri());
    let raw = client
        .infer("gs://b/v.mp4", "analyze", &json!({"type": "OBJECT"}))
        .await
        .unwrap();

    assert_eq!(raw, "{\"a\": 1}");
}

#[tokio::test]
async fn test_server_error_maps_to_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend overloaded"))
        .mount(&server)
        .await;

    let client = test_client(server.uri());
    let err = client
        .infer("gs://b/v.mp4", "analyze", &json!({"type": "OBJECT"}))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Unavailable(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_blocked_prompt_maps_to_refused() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [],
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let client = test_client(server.uri());
    let err = client
        .infer("gs://b/v.mp4", "analyze", &json!({"type": "OBJECT"}))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Refused(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_safety_finish_reason_maps_to_refused() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        })))
        .mount(&server)
        .await;

    let client = test_client(server.uri());
    let err = client
        .infer("gs://b/v.mp4", "analyze", &json!({"type": "OBJECT"}))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Refused(_)));
}

#[tokio::test]
async fn test_unparseable_envelope_maps_to_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = test_client(server.uri());
    let err = client
        .infer("gs://b/v.mp4", "analyze", &json!({"type": "OBJECT"}))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Malformed(_)));
}

#[tokio::test]
async fn test_empty_candidate_list_maps_to_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = test_client(server.uri());
    let err = client
        .infer("gs://b/v.mp4", "analyze", &json!({"type": "OBJECT"}))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Malformed(_)));
}
