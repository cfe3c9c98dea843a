//! Platform trait for the authenticate-then-submit sequence.

use async_trait::async_trait;
use herald_core::{AccessToken, GeneratedPost, SubmissionResult};
use herald_error::HeraldResult;

/// A platform Herald can publish to.
///
/// Each run calls [`authenticate`](PostPlatform::authenticate) once and
/// passes the token to [`submit`](PostPlatform::submit). Tokens are never
/// cached between runs.
#[async_trait]
pub trait PostPlatform: Send + Sync {
    /// Obtain a fresh bearer token.
    ///
    /// # Errors
    ///
    /// Returns a token-exchange error carrying the remote body when the
    /// credentials are refused.
    async fn authenticate(&self) -> HeraldResult<AccessToken>;

    /// Publish `post`, tagging it with `category_tag` when given.
    ///
    /// # Errors
    ///
    /// Returns a submission error carrying the remote body when the
    /// platform rejects the post.
    async fn submit(
        &self,
        post: &GeneratedPost,
        token: &AccessToken,
        category_tag: Option<&str>,
    ) -> HeraldResult<SubmissionResult>;

    /// Platform name used in logs (e.g., "reddit").
    fn platform_name(&self) -> &'static str;

    /// Community the platform publishes into (e.g., a subreddit name).
    fn target(&self) -> &str;
}
