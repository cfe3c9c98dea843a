//! Assembling a pipeline from configuration.

use herald_bot::{HeraldConfig, build_pipeline};
use herald_error::HeraldErrorKind;
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_toml(server: &MockServer, store: &str) -> String {
    format!(
        r#"
        [reddit]
        client_id = "id"
        client_secret = "secret"
        username = "herald_bot"
        password = "pw"
        subreddit = "wellbeing"
        auth_base_url = "{uri}"
        api_base_url = "{uri}"

        [generator]
        provider = "openai"
        api_key = "sk-test"
        model = "gpt-test"
        base_url = "{uri}"

        [schedule]
        enabled = false

        {store}
        "#,
        uri = server.uri(),
        store = store
    )
}

#[tokio::test]
async fn test_file_backed_pipeline_runs_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Title: Rest well\nContent: Sleep is a skill."},
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .and(body_string_contains("flair_id=F1"))
        .and(body_string_contains("subreddit=wellbeing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "json": {"errors": [], "data": {"id": "9z"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "{}",
        json!({"pillars": [{"name": "Resilience", "flairId": "F1"}, "Growth"]})
    )
    .unwrap();

    let store = format!(
        "[store]\nbackend = \"file\"\npath = \"{}\"",
        file.path().display().to_string().replace('\\', "\\\\")
    );
    let config = HeraldConfig::from_toml_str(&config_toml(&server, &store)).unwrap();
    let pipeline = build_pipeline(&config).unwrap();

    let outcome = pipeline.run_on_demand("resilience", "story").await.unwrap();
    assert_eq!(outcome.pillar.name, "Resilience");
    assert_eq!(outcome.post.title, "Rest well");
    assert_eq!(outcome.submission.id.as_deref(), Some("9z"));
}

#[tokio::test]
async fn test_build_pipeline_validates_first() {
    let server = MockServer::start().await;
    let config =
        HeraldConfig::from_toml_str(&config_toml(&server, "[store]\nbackend = \"file\"")).unwrap();

    let err = build_pipeline(&config).unwrap_err();
    assert!(matches!(err.kind(), HeraldErrorKind::Config(_)));
    assert!(err.to_string().contains("store.path"));
}

#[tokio::test]
async fn test_inline_memory_store_feeds_pipeline() {
    let server = MockServer::start().await;
    let store = "[store]\ninline = '[\"Gratitude\"]'";
    let config = HeraldConfig::from_toml_str(&config_toml(&server, store)).unwrap();
    let pipeline = build_pipeline(&config).unwrap();

    let pillars = pipeline.resolve_pillars().await.unwrap();
    assert_eq!(pillars.len(), 1);
    assert_eq!(pillars[0].name, "Gratitude");
}
