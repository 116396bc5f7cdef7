use cappy_llm::{ChatClient, GeminiClient, GenerateOptions, GenerateRequest, LlmError};

const PATH: &str = "/models/gemini-1.5-flash:generateContent";

fn client_for(server: &mockito::ServerGuard) -> GeminiClient {
    GeminiClient::builder()
        .api_key("test-key")
        .base_url(server.url())
        .build()
        .unwrap()
}

#[test]
fn test_gemini_client_builder_success() {
    let result = GeminiClient::builder().api_key("test-key").build();
    assert!(result.is_ok());
}

#[test]
fn test_gemini_client_builder_missing_api_key() {
    let result = GeminiClient::builder().build();

    assert!(result.is_err());
    let err_msg = result.err().unwrap().to_string();
    assert!(err_msg.contains("API key"));
}

#[tokio::test]
async fn test_generate_returns_text_and_usage() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "contents": [{"parts": [{"text": "What is CapServ?"}]}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "candidates": [{"content": {"parts": [{"text": "CapServ is a lending platform."}]}, "finishReason": "STOP"}],
                "usageMetadata": {"promptTokenCount": 7, "candidatesTokenCount": 6, "totalTokenCount": 13}
            }"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client
        .generate(GenerateRequest::new("gemini-1.5-flash", "What is CapServ?"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.text.as_deref(), Some("CapServ is a lending platform."));
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(response.usage.unwrap().total_tokens, 13);
}

#[tokio::test]
async fn test_generate_sends_generation_config() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "generationConfig": {"maxOutputTokens": 128}
        })))
        .with_status(200)
        .with_body(r#"{"candidates": [{"content": {"parts": [{"text": "ok"}]}}]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let request = GenerateRequest::new("gemini-1.5-flash", "hi")
        .with_options(GenerateOptions::new().max_output_tokens(128));
    let response = client.generate(request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.non_empty_text(), Some("ok"));
}

#[tokio::test]
async fn test_generate_empty_candidates_is_not_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"candidates": []}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client
        .generate(GenerateRequest::new("gemini-1.5-flash", "hi"))
        .await
        .unwrap();

    assert!(response.text.is_none());
    assert!(response.non_empty_text().is_none());
}

#[tokio::test]
async fn test_generate_maps_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(403)
        .with_body(r#"{"error": {"message": "API key not valid"}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .generate(GenerateRequest::new("gemini-1.5-flash", "hi"))
        .await
        .unwrap_err();

    match err {
        LlmError::Api { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("API key not valid"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_generate_maps_malformed_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .generate(GenerateRequest::new("gemini-1.5-flash", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Decode(_)));
}
