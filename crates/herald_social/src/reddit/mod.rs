//! Reddit script-app integration.
//!
//! Authentication uses the password grant against
//! `{auth_base_url}/api/v1/access_token`; submission posts a form to
//! `{api_base_url}/api/submit` with the bearer token.

mod auth;
mod client;
mod submit;

pub use client::{REDDIT_API_BASE, REDDIT_AUTH_BASE, RedditClient, RedditConfig, RedditCredentials};
pub use submit::{REDDIT_TITLE_LIMIT, submission_form};
