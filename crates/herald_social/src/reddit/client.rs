use crate::PostPlatform;
use async_trait::async_trait;
use herald_core::{AccessToken, GeneratedPost, SubmissionResult};
use herald_error::HeraldResult;
use reqwest::Client;
use tracing::debug;

/// Default base URL for the token endpoint.
pub const REDDIT_AUTH_BASE: &str = "https://www.reddit.com";

/// Default base URL for authenticated API calls.
pub const REDDIT_API_BASE: &str = "https://oauth.reddit.com";

/// Script-app and account credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct RedditCredentials {
    /// Application (client) id
    pub client_id: String,
    /// Application secret
    pub client_secret: String,
    /// Account username
    pub username: String,
    /// Account password
    pub password: String,
}

impl std::fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Settings for a [`RedditClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedditConfig {
    /// Credentials for the password grant
    pub credentials: RedditCredentials,
    /// User-Agent sent on every request
    pub user_agent: String,
    /// Subreddit to post into, without the `r/` prefix
    pub subreddit: String,
    /// Token endpoint base URL
    pub auth_base_url: String,
    /// Authenticated API base URL
    pub api_base_url: String,
}

impl RedditConfig {
    /// Create a configuration pointing at the public Reddit endpoints.
    pub fn new(
        credentials: RedditCredentials,
        user_agent: impl Into<String>,
        subreddit: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            user_agent: user_agent.into(),
            subreddit: subreddit.into().trim_start_matches("r/").to_string(),
            auth_base_url: REDDIT_AUTH_BASE.to_string(),
            api_base_url: REDDIT_API_BASE.to_string(),
        }
    }

    /// Point both endpoints at `base_url` (used with mock servers).
    pub fn with_base_urls(
        mut self,
        auth_base_url: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Self {
        self.auth_base_url = auth_base_url.into();
        self.api_base_url = api_base_url.into();
        self
    }
}

/// Reddit API client.
#[derive(Debug, Clone)]
pub struct RedditClient {
    pub(super) client: Client,
    pub(super) config: RedditConfig,
}

impl RedditClient {
    /// Creates a new client with its own connection pool.
    pub fn new(config: RedditConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Creates a new client sharing an existing connection pool.
    pub fn with_client(client: Client, config: RedditConfig) -> Self {
        debug!(subreddit = %config.subreddit, "Creating Reddit client");
        Self { client, config }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &RedditConfig {
        &self.config
    }

    pub(super) fn url(base: &str, path: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl PostPlatform for RedditClient {
    async fn authenticate(&self) -> HeraldResult<AccessToken> {
        self.exchange_token().await
    }

    async fn submit(
        &self,
        post: &GeneratedPost,
        token: &AccessToken,
        category_tag: Option<&str>,
    ) -> HeraldResult<SubmissionResult> {
        self.submit_post(post, token, category_tag).await
    }

    fn platform_name(&self) -> &'static str {
        "reddit"
    }

    fn target(&self) -> &str {
        &self.config.subreddit
    }
}
