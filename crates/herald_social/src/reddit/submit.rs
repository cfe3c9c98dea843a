//! Self-post submission.

use super::RedditClient;
use herald_core::{AccessToken, GeneratedPost, SubmissionResult};
use herald_error::{HeraldResult, SocialError, SocialErrorKind};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

/// Maximum title length Reddit accepts, in characters.
pub const REDDIT_TITLE_LIMIT: usize = 300;

/// Build the submission form fields.
///
/// `flair_id` is only included when a non-empty category tag is given.
/// Titles longer than [`REDDIT_TITLE_LIMIT`] characters are truncated.
///
/// ```
/// use herald_core::GeneratedPost;
/// use herald_social::submission_form;
///
/// let post = GeneratedPost::new("Hello", "World");
/// let form = submission_form(&post, "test", Some("flair-1"));
/// assert!(form.contains(&("flair_id", "flair-1".to_string())));
/// assert!(form.contains(&("kind", "self".to_string())));
/// ```
pub fn submission_form(
    post: &GeneratedPost,
    subreddit: &str,
    category_tag: Option<&str>,
) -> Vec<(&'static str, String)> {
    let title: String = post.title.chars().take(REDDIT_TITLE_LIMIT).collect();
    let mut form = vec![
        ("api_type", "json".to_string()),
        ("subreddit", subreddit.to_string()),
        ("title", title),
        ("kind", "self".to_string()),
        ("text", post.content.clone()),
    ];
    if let Some(tag) = category_tag.map(str::trim).filter(|t| !t.is_empty()) {
        form.push(("flair_id", tag.to_string()));
    }
    form
}

/// Errors Reddit reports inside a 200 response under `json.errors`.
fn embedded_errors(raw: &Value) -> Option<&Vec<Value>> {
    raw.pointer("/json/errors")
        .and_then(Value::as_array)
        .filter(|errors| !errors.is_empty())
}

impl RedditClient {
    /// Submit `post` as a self post to the configured subreddit.
    #[instrument(
        skip(self, post, token),
        fields(subreddit = %self.config.subreddit, flair = category_tag.is_some())
    )]
    pub async fn submit_post(
        &self,
        post: &GeneratedPost,
        token: &AccessToken,
        category_tag: Option<&str>,
    ) -> HeraldResult<SubmissionResult> {
        if post.title.chars().count() > REDDIT_TITLE_LIMIT {
            warn!(
                length = post.title.chars().count(),
                "Title exceeds Reddit limit, truncating"
            );
        }

        let url = Self::url(&self.config.api_base_url, "/api/submit");
        let form = submission_form(post, &self.config.subreddit, category_tag);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.secret())
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Submission request failed");
                SocialError::new(SocialErrorKind::Http(format!(
                    "Submission request failed: {}",
                    e
                )))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            SocialError::new(SocialErrorKind::Http(format!(
                "Failed to read submission response: {}",
                e
            )))
        })?;

        if !status.is_success() {
            error!(status = %status, body = %body, "Submission rejected");
            return Err(SocialError::new(SocialErrorKind::Submission {
                status: status.as_u16(),
                body,
            })
            .into());
        }

        let raw: Value = serde_json::from_str(&body).map_err(|e| {
            error!(error = ?e, body = %body, "Submission response is not JSON");
            SocialError::new(SocialErrorKind::Parse(format!(
                "Invalid submission response: {}",
                e
            )))
        })?;

        if let Some(errors) = embedded_errors(&raw) {
            error!(errors = ?errors, "Reddit reported submission errors");
            return Err(SocialError::new(SocialErrorKind::Submission {
                status: status.as_u16(),
                body,
            })
            .into());
        }

        let result = SubmissionResult::from_raw(raw);
        info!(
            id = result.id.as_deref().unwrap_or(""),
            url = result.url.as_deref().unwrap_or(""),
            "Post submitted"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_omits_flair_when_absent_or_blank() {
        let post = GeneratedPost::new("T", "C");
        for tag in [None, Some(""), Some("   ")] {
            let form = submission_form(&post, "sub", tag);
            assert!(form.iter().all(|(k, _)| *k != "flair_id"));
        }
    }

    #[test]
    fn test_form_truncates_long_titles() {
        let post = GeneratedPost::new("x".repeat(REDDIT_TITLE_LIMIT + 50), "C");
        let form = submission_form(&post, "sub", None);
        let title = form
            .iter()
            .find(|(k, _)| *k == "title")
            .map(|(_, v)| v.clone())
            .unwrap();
        assert_eq!(title.chars().count(), REDDIT_TITLE_LIMIT);
    }

    #[test]
    fn test_embedded_errors_detection() {
        assert!(embedded_errors(&json!({"json": {"errors": []}})).is_none());
        assert!(embedded_errors(&json!({"success": true})).is_none());
        assert!(
            embedded_errors(&json!({"json": {"errors": [["RATELIMIT", "slow down", "ratelimit"]]}}))
                .is_some()
        );
    }
}
