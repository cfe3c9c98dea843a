//! Core data types for the Herald posting bot.
//!
//! This crate holds the values that flow through one pipeline run: the
//! [`Pillar`] being written about, the requested [`PostType`], the
//! [`GeneratedPost`] produced by the text generator, the short-lived
//! [`AccessToken`], and the platform's [`SubmissionResult`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod pillar;
mod post;
mod post_type;
mod sanitize;

pub use pillar::{Pillar, default_pillars, find_pillar};
pub use post::{AccessToken, GeneratedPost, SubmissionResult};
pub use post_type::PostType;
pub use sanitize::{MAX_PROMPT_FIELD_CHARS, sanitize_prompt_field};
