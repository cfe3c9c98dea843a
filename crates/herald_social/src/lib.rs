//! Social platform integration for Herald.
//!
//! This crate provides the two platform-facing steps of a run behind the
//! [`PostPlatform`] trait:
//!
//! - **Credential exchange**: trade stored app and account credentials for
//!   a short-lived bearer token
//! - **Post submission**: publish a generated self post, optionally tagged
//!   with a category (flair)
//!
//! # Platforms
//!
//! - `reddit` - Reddit script-app integration ([`RedditClient`])

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod platform;
mod reddit;

pub use platform::PostPlatform;
pub use reddit::{
    REDDIT_API_BASE, REDDIT_AUTH_BASE, REDDIT_TITLE_LIMIT, RedditClient, RedditConfig,
    RedditCredentials, submission_form,
};
