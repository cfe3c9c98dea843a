//! Tests for the text generation providers against mocked HTTP endpoints.

use herald_error::{GenerationErrorKind, HeraldErrorKind};
use herald_models::{
    ChatCompletionsClient, ChatCompletionsConfig, GeminiClient, GeminiConfig, GenerationSettings,
    TextGenerator,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_reply(text: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

fn generation_kind(err: &herald_error::HeraldError) -> &GenerationErrorKind {
    match err.kind() {
        HeraldErrorKind::Generation(e) => &e.kind,
        other => panic!("expected generation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_chat_completions_sends_bearer_and_returns_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "test-model", "temperature": 0.5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("hello")))
        .expect(1)
        .mount(&server)
        .await;

    let config = ChatCompletionsConfig::new(server.uri(), "test-model")
        .with_api_key("sk-test")
        .with_settings(GenerationSettings {
            temperature: Some(0.5),
            max_tokens: None,
        });
    let client = ChatCompletionsClient::new(config);

    let text = client.generate_text("Say hello").await.unwrap();
    assert_eq!(text, "hello");
    assert_eq!(client.provider_name(), "openai");
}

#[tokio::test]
async fn test_chat_completions_error_carries_remote_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited, slow down"))
        .mount(&server)
        .await;

    let client = ChatCompletionsClient::new(ChatCompletionsConfig::new(server.uri(), "m"));
    let err = client.generate_text("x").await.unwrap_err();

    match generation_kind(&err) {
        GenerationErrorKind::Api { status, body } => {
            assert_eq!(*status, 429);
            assert!(body.contains("slow down"));
        }
        other => panic!("unexpected kind {:?}", other),
    }
}

#[tokio::test]
async fn test_chat_completions_empty_content_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]
        })))
        .mount(&server)
        .await;

    let client = ChatCompletionsClient::new(ChatCompletionsConfig::new(server.uri(), "m"));
    let err = client.generate_text("x").await.unwrap_err();
    assert_eq!(generation_kind(&err), &GenerationErrorKind::EmptyResponse);
}

#[tokio::test]
async fn test_gemini_uses_api_key_header_and_joins_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-test:generateContent"))
        .and(header("x-goog-api-key", "g-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Title: A"}, {"text": "\nContent: B"}]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(GeminiConfig::new("gemini-test", "g-key").with_base_url(server.uri()));
    let text = client.generate_text("prompt").await.unwrap();
    assert_eq!(text, "Title: A\nContent: B");
}

#[tokio::test]
async fn test_gemini_without_candidates_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"promptFeedback": {"blockReason": "SAFETY"}})))
        .mount(&server)
        .await;

    let client = GeminiClient::new(GeminiConfig::new("m", "k").with_base_url(server.uri()));
    let err = client.generate_text("prompt").await.unwrap_err();
    assert_eq!(generation_kind(&err), &GenerationErrorKind::EmptyResponse);
}
