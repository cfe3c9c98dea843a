//! Values produced during a single pipeline run.

use serde::{Deserialize, Serialize};

/// Title and body produced by the text generator.
///
/// Created per run, submitted once, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratedPost {
    /// Post title
    pub title: String,
    /// Post body (markdown)
    pub content: String,
}

impl GeneratedPost {
    /// Create a new generated post.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Short-lived bearer token for the submission endpoint.
///
/// Opaque to Herald; the expiry is owned by the remote credential service.
/// One token is obtained per run and dropped afterwards.
///
/// ```
/// use herald_core::AccessToken;
///
/// let token = AccessToken::new("abc123");
/// assert_eq!(token.secret(), "abc123");
/// assert!(!format!("{:?}", token).contains("abc123"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the authorization header.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// The platform's acknowledgment of a submitted post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// Short post id (e.g. `1abcde`)
    pub id: Option<String>,
    /// Fullname of the post (e.g. `t3_1abcde`)
    pub name: Option<String>,
    /// Permalink to the new post
    pub url: Option<String>,
    /// Acknowledgment exactly as the platform returned it
    pub raw: serde_json::Value,
}

impl SubmissionResult {
    /// Build a result from the platform's raw JSON acknowledgment.
    ///
    /// Understands Reddit's `api_type=json` envelope (`{"json": {"data": {...}}}`)
    /// and falls back to top-level `id`/`name`/`url` fields.
    ///
    /// ```
    /// use herald_core::SubmissionResult;
    ///
    /// let raw = serde_json::json!({
    ///     "json": {"errors": [], "data": {"id": "abc", "name": "t3_abc", "url": "https://r/abc"}}
    /// });
    /// let result = SubmissionResult::from_raw(raw);
    /// assert_eq!(result.name.as_deref(), Some("t3_abc"));
    /// ```
    pub fn from_raw(raw: serde_json::Value) -> Self {
        let (id, name, url) = {
            let data = raw
                .get("json")
                .and_then(|j| j.get("data"))
                .unwrap_or(&raw);
            let field = |key: &str| data.get(key).and_then(|v| v.as_str()).map(str::to_string);
            (field("id"), field("name"), field("url"))
        };

        Self { id, name, url, raw }
    }
}
