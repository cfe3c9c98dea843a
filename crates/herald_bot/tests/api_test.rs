//! End-to-end tests of the HTTP API on an ephemeral port.

use async_trait::async_trait;
use herald_bot::{
    ApiState, LIVENESS_MESSAGE, Pipeline, PipelineMetrics, bind_listener, create_router, serve,
};
use herald_core::{Pillar, default_pillars};
use herald_error::HeraldResult;
use herald_models::{ContentGenerator, FieldPolicy, TextGenerator};
use herald_social::{RedditClient, RedditConfig, RedditCredentials};
use herald_storage::MemoryConfigStore;
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct FixedReply;

#[async_trait]
impl TextGenerator for FixedReply {
    async fn generate_text(&self, _prompt: &str) -> HeraldResult<String> {
        Ok("{\"title\":\"Small wins\",\"content\":\"Start with one habit.\"}".to_string())
    }

    fn provider_name(&self) -> &'static str {
        "fixed"
    }

    fn model_name(&self) -> &str {
        "fixed-reply"
    }
}

async fn spawn_api(reddit: &MockServer) -> (String, PipelineMetrics) {
    let config = RedditConfig::new(
        RedditCredentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            username: "herald_bot".to_string(),
            password: "pw".to_string(),
        },
        "herald-test/0.1",
        "wellbeing",
    )
    .with_base_urls(reddit.uri(), reddit.uri());

    let store = MemoryConfigStore::new()
        .with_pillars(
            "pillars",
            &[
                Pillar::new("Resilience").with_category_tag("X"),
                Pillar::new("Purpose"),
            ],
        )
        .unwrap();
    let pipeline = Pipeline::new(
        Arc::new(store),
        ContentGenerator::new(Arc::new(FixedReply), FieldPolicy::Lenient),
        Arc::new(RedditClient::new(config)),
        default_pillars(),
    );

    let metrics = PipelineMetrics::new();
    let listener = bind_listener("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let router = create_router(ApiState::new(Arc::new(pipeline), metrics.clone()));
    tokio::spawn(serve(listener, router, std::future::pending()));

    (format!("http://{}", address), metrics)
}

async fn mount_token_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})))
        .mount(server)
        .await;
}

async fn post_trigger(base: &str, body: &str) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{}/", base))
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_post_publishes_and_returns_post_and_result() {
    let reddit = MockServer::start().await;
    mount_token_ok(&reddit).await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .and(body_string_contains("flair_id=X"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "json": {"errors": [], "data": {"id": "1abc", "name": "t3_1abc", "url": "https://reddit.com/1abc"}}
        })))
        .expect(1)
        .mount(&reddit)
        .await;

    let (base, metrics) = spawn_api(&reddit).await;
    let (status, body) = post_trigger(&base, r#"{"pillar":"Resilience","postType":"tip"}"#).await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["post"]["title"], json!("Small wins"));
    assert_eq!(body["post"]["content"], json!("Start with one habit."));
    assert_eq!(body["redditResult"]["json"]["data"]["id"], json!("1abc"));
    assert!(body.get("error").is_none());
    assert!(metrics.time_since_success(herald_bot::Trigger::OnDemand).is_some());
}

#[tokio::test]
async fn test_unknown_pillar_is_bad_request() {
    let reddit = MockServer::start().await;
    let (base, _) = spawn_api(&reddit).await;

    let (status, body) = post_trigger(&base, r#"{"pillar":"Chaos","postType":"tip"}"#).await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Unknown pillar: Chaos"));
    assert!(body.get("post").is_none());
}

#[tokio::test]
async fn test_unknown_post_type_and_malformed_body_are_bad_requests() {
    let reddit = MockServer::start().await;
    let (base, _) = spawn_api(&reddit).await;

    let (status, body) = post_trigger(&base, r#"{"pillar":"Purpose","postType":"sonnet"}"#).await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("sonnet"));

    let (status, body) = post_trigger(&base, "{not json").await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], json!(false));

    let (status, _) = post_trigger(&base, r#"{"pillar":"Purpose"}"#).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_remote_failure_is_server_error_with_body() {
    let reddit = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("{\"message\": \"Unauthorized\"}"))
        .mount(&reddit)
        .await;

    let (base, metrics) = spawn_api(&reddit).await;
    let (status, body) = post_trigger(&base, r#"{"pillar":"Purpose","postType":"story"}"#).await;

    assert_eq!(status, 500);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("Unauthorized"));
    assert_eq!(metrics.failures(herald_bot::Trigger::OnDemand), 1);
}

#[tokio::test]
async fn test_non_post_requests_get_liveness_text() {
    let reddit = MockServer::start().await;
    let (base, _) = spawn_api(&reddit).await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{}/", base)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), LIVENESS_MESSAGE);

    let response = client.put(format!("{}/", base)).send().await.unwrap();
    assert_eq!(response.text().await.unwrap(), LIVENESS_MESSAGE);
}

#[tokio::test]
async fn test_health_and_metrics_endpoints() {
    let reddit = MockServer::start().await;
    let (base, _) = spawn_api(&reddit).await;
    let client = reqwest::Client::new();

    let health: Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health, json!({"status": "ok"}));

    post_trigger(&base, r#"{"pillar":"Chaos","postType":"tip"}"#).await;

    let metrics: Value = client
        .get(format!("{}/metrics", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(metrics["on_demand"]["executions"], json!(1));
    assert_eq!(metrics["on_demand"]["rejections"], json!(1));
    assert_eq!(metrics["scheduled"]["executions"], json!(0));
}
