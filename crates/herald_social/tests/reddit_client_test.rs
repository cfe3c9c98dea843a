//! Credential exchange and submission against a mock Reddit.

use herald_core::GeneratedPost;
use herald_error::{HeraldErrorKind, SocialErrorKind};
use herald_social::{PostPlatform, RedditClient, RedditConfig, RedditCredentials};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> RedditClient {
    let config = RedditConfig::new(
        RedditCredentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            username: "herald_bot".to_string(),
            password: "hunter2".to_string(),
        },
        "herald-test/0.1",
        "r/wellbeing",
    )
    .with_base_urls(server.uri(), server.uri());
    RedditClient::new(config)
}

fn social_kind(err: &herald_error::HeraldError) -> &SocialErrorKind {
    match err.kind() {
        HeraldErrorKind::Social(e) => &e.kind,
        other => panic!("Expected social error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_token_exchange_sends_basic_auth_and_password_grant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .and(header("authorization", "Basic aWQ6c2VjcmV0"))
        .and(header("user-agent", "herald-test/0.1"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=herald_bot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-123",
            "token_type": "bearer",
            "expires_in": 86400,
            "scope": "*"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server).authenticate().await.unwrap();
    assert_eq!(token.secret(), "tok-123");
}

#[tokio::test]
async fn test_token_exchange_failure_surfaces_remote_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"message": "Unauthorized"}"#))
        .mount(&server)
        .await;

    let err = client_for(&server).authenticate().await.unwrap_err();
    let kind = social_kind(&err);
    assert!(matches!(kind, SocialErrorKind::TokenExchange { status: 401, .. }));
    assert!(kind.remote_body().unwrap().contains("Unauthorized"));
    assert!(err.message().contains("Unauthorized"));
}

#[tokio::test]
async fn test_token_response_without_access_token_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "invalid_grant"})))
        .mount(&server)
        .await;

    let err = client_for(&server).authenticate().await.unwrap_err();
    let kind = social_kind(&err);
    assert!(matches!(kind, SocialErrorKind::TokenExchange { status: 200, .. }));
    assert!(kind.remote_body().unwrap().contains("invalid_grant"));
}

#[tokio::test]
async fn test_submit_sends_form_with_flair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_string_contains("subreddit=wellbeing"))
        .and(body_string_contains("kind=self"))
        .and(body_string_contains("flair_id=flair-resilience"))
        .and(body_string_contains("title=Bounce+back"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "json": {
                "errors": [],
                "data": {
                    "id": "1abcde",
                    "name": "t3_1abcde",
                    "url": "https://www.reddit.com/r/wellbeing/comments/1abcde/"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let post = GeneratedPost::new("Bounce back", "Some thoughts on resilience.");
    let token = herald_core::AccessToken::new("tok-123");
    let result = client
        .submit(&post, &token, Some("flair-resilience"))
        .await
        .unwrap();

    assert_eq!(result.id.as_deref(), Some("1abcde"));
    assert_eq!(result.name.as_deref(), Some("t3_1abcde"));
    assert!(result.url.unwrap().contains("1abcde"));
}

#[tokio::test]
async fn test_submit_without_flair_omits_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .and(body_string_contains("flair_id"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"json": {"errors": [], "data": {"id": "x"}}})))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .submit(
            &GeneratedPost::new("T", "C"),
            &herald_core::AccessToken::new("tok"),
            None,
        )
        .await
        .unwrap();
    assert_eq!(result.id.as_deref(), Some("x"));
}

#[tokio::test]
async fn test_submit_embedded_errors_are_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "json": {"errors": [["SUBREDDIT_NOEXIST", "that subreddit doesn't exist", "sr"]]}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .submit(
            &GeneratedPost::new("T", "C"),
            &herald_core::AccessToken::new("tok"),
            None,
        )
        .await
        .unwrap_err();
    let kind = social_kind(&err);
    assert!(matches!(kind, SocialErrorKind::Submission { status: 200, .. }));
    assert!(kind.remote_body().unwrap().contains("SUBREDDIT_NOEXIST"));
}

#[tokio::test]
async fn test_submit_http_error_surfaces_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden: banned"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .submit(
            &GeneratedPost::new("T", "C"),
            &herald_core::AccessToken::new("tok"),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        social_kind(&err),
        SocialErrorKind::Submission { status: 403, .. }
    ));
    assert!(err.message().contains("forbidden: banned"));
}

#[test]
fn test_config_strips_subreddit_prefix_and_redacts_secrets() {
    let config = RedditConfig::new(
        RedditCredentials {
            client_id: "id".to_string(),
            client_secret: "very-secret".to_string(),
            username: "u".to_string(),
            password: "pw-secret".to_string(),
        },
        "ua",
        "r/wellbeing",
    );
    assert_eq!(config.subreddit, "wellbeing");
    let debug = format!("{:?}", config);
    assert!(!debug.contains("very-secret"));
    assert!(!debug.contains("pw-secret"));
}
