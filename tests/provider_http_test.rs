//! Provider wire-format tests against HTTP doubles.

mod common;

use joke_battles::services::providers::anthropic::AnthropicProvider;
use joke_battles::services::providers::gemini::GeminiProvider;
use joke_battles::services::providers::ollama::OllamaProvider;
use joke_battles::services::providers::openai::OpenAiProvider;
use joke_battles::services::providers::{JokeProvider, ProviderError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn ollama_success_returns_trimmed_joke() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "  Why did the llama cross the road?  "
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(Some(server.uri()), "llama3.2".to_string());
    assert!(provider.is_configured());

    let joke = provider.generate("roads").await.unwrap();
    assert_eq!(joke, "Why did the llama cross the road?");
}

#[tokio::test]
async fn ollama_server_error_is_an_api_error() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(Some(server.uri()), "llama3.2".to_string());
    let err = provider.generate("roads").await.unwrap_err();
    assert!(matches!(err, ProviderError::ApiError(_)));
}

#[tokio::test]
async fn openai_success_extracts_first_choice() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "A purr-fect joke." } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new(Some("test-key".to_string()), "gpt-3.5-turbo".to_string())
        .with_base_url(server.uri());

    let joke = provider.generate("cats").await.unwrap();
    assert_eq!(joke, "A purr-fect joke.");
}

#[tokio::test]
async fn openai_empty_choices_is_malformed() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new(Some("test-key".to_string()), "gpt-3.5-turbo".to_string())
        .with_base_url(server.uri());

    let err = provider.generate("cats").await.unwrap_err();
    assert!(matches!(err, ProviderError::MalformedResponse(_)));
}

#[tokio::test]
async fn anthropic_success_extracts_first_content_block() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                { "type": "text", "text": "  Claude walks into a bar.  " }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new(
        Some("test-key".to_string()),
        "claude-3-5-sonnet-20241022".to_string(),
    )
    .with_base_url(server.uri());

    let joke = provider.generate("bars").await.unwrap();
    assert_eq!(joke, "Claude walks into a bar.");
}

#[tokio::test]
async fn anthropic_server_error_is_an_api_error() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new(
        Some("test-key".to_string()),
        "claude-3-5-sonnet-20241022".to_string(),
    )
    .with_base_url(server.uri());

    let err = provider.generate("bars").await.unwrap_err();
    assert!(matches!(err, ProviderError::ApiError(_)));
}

#[tokio::test]
async fn anthropic_empty_content_is_malformed() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new(
        Some("test-key".to_string()),
        "claude-3-5-sonnet-20241022".to_string(),
    )
    .with_base_url(server.uri());

    let err = provider.generate("bars").await.unwrap_err();
    assert!(matches!(err, ProviderError::MalformedResponse(_)));
}

#[tokio::test]
async fn gemini_success_extracts_first_candidate_part() {
    common::init_tracing();
    let server = MockServer::start().await;

    // The key rides in the query string and the generation settings must go
    // out camelCased.
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "temperature": 0.9, "maxOutputTokens": 150 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "  A stellar punchline.  " } ] } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GeminiProvider::new(Some("test-key".to_string()), "gemini-1.5-flash".to_string())
        .with_base_url(server.uri());

    let joke = provider.generate("stars").await.unwrap();
    assert_eq!(joke, "A stellar punchline.");
}

#[tokio::test]
async fn gemini_server_error_is_an_api_error() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = GeminiProvider::new(Some("test-key".to_string()), "gemini-1.5-flash".to_string())
        .with_base_url(server.uri());

    let err = provider.generate("stars").await.unwrap_err();
    assert!(matches!(err, ProviderError::ApiError(_)));
}

#[tokio::test]
async fn gemini_missing_candidates_is_malformed() {
    common::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let provider = GeminiProvider::new(Some("test-key".to_string()), "gemini-1.5-flash".to_string())
        .with_base_url(server.uri());

    let err = provider.generate("stars").await.unwrap_err();
    assert!(matches!(err, ProviderError::MalformedResponse(_)));
}

#[tokio::test]
async fn unconfigured_provider_fails_locally() {
    common::init_tracing();

    // No server at all: a missing key must fail before any I/O.
    let provider = OpenAiProvider::new(None, "gpt-3.5-turbo".to_string());
    assert!(!provider.is_configured());

    let err = provider.generate("cats").await.unwrap_err();
    assert!(matches!(err, ProviderError::NotConfigured(_)));
}
