//! Tests for the upstream HTTP client with mocking

use chatrelay_core::config::SecretString;
use chatrelay_core::http::{CompletionBackend, RequestOptions, UpstreamClient, UpstreamError};
use chatrelay_core::protocol::{CompletionRequest, Message};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_request() -> CompletionRequest {
    CompletionRequest::new(
        "llama3-8b-8192",
        vec![Message::system("Be brief."), Message::user("Hello")],
    )
    .with_max_tokens(500)
}

fn test_client(server: &MockServer) -> UpstreamClient {
    UpstreamClient::new(
        format!("{}/v1/chat/completions", server.uri()),
        SecretString::new("gsk_test"),
    )
    .expect("Failed to create client")
}

#[tokio::test]
async fn test_success_json_response() {
    let mock_server = MockServer::start().await;
    let request_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer gsk_test"))
        .and(header("x-request-id", request_id.to_string().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Hi there"}}],
            "usage": {"total_tokens": 12}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let options = RequestOptions::new().with_request_id(request_id);
    let response = client.complete(test_request(), options).await.unwrap();

    assert_eq!(response.first_content(), Some("Hi there"));
    assert_eq!(response.total_tokens(), 12);
}

#[tokio::test]
async fn test_error_status_keeps_upstream_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Invalid API Key"}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .complete(test_request(), RequestOptions::new())
        .await
        .unwrap_err();

    match err {
        UpstreamError::Status { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("Invalid API Key"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_wrong_content_type_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .complete(test_request(), RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_probe_accepts_any_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(client.probe(RequestOptions::new()).await.is_ok());
}
