//! Prompt construction and post parsing around a [`TextGenerator`].

use crate::{TextGenerator, extract_json_object, extract_marked_fields};
use herald_core::{GeneratedPost, PostType, sanitize_prompt_field};
use herald_error::{GenerationError, GenerationErrorKind, HeraldResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Title substituted when a reply has content but no title.
pub const PLACEHOLDER_TITLE: &str = "Untitled post";

/// Content substituted when a reply has a title but no content.
pub const PLACEHOLDER_CONTENT: &str = "No content generated.";

/// What to do when a reply is missing one of the two fields.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FieldPolicy {
    /// Substitute a placeholder and log a warning
    #[default]
    Lenient,
    /// Treat the reply as unparsable
    Strict,
}

/// Build the instruction prompt for one post.
///
/// Both inputs are sanitized before interpolation.
///
/// ```
/// use herald_core::PostType;
/// use herald_models::build_prompt;
///
/// let prompt = build_prompt("Resilience", PostType::Tip);
/// assert!(prompt.contains("Resilience"));
/// assert!(prompt.contains("\"title\""));
/// ```
pub fn build_prompt(pillar: &str, post_type: PostType) -> String {
    let pillar = sanitize_prompt_field(pillar);
    format!(
        "You are writing a post for an online community.\n\
         Content pillar (theme): {pillar}\n\
         Post type: {post_type}. {guidance}\n\
         \n\
         Keep the tone warm, practical and non-promotional. Do not use hashtags.\n\
         The title must be a single line under 300 characters. The content may use markdown.\n\
         \n\
         Respond with ONLY a JSON object of the form:\n\
         {{\"title\": \"...\", \"content\": \"...\"}}",
        pillar = pillar,
        post_type = post_type,
        guidance = post_type.guidance(),
    )
}

/// Parse a model reply into a post.
///
/// Tries, in order:
/// 1. the first JSON object in the reply, after removing code fences
/// 2. `Title:` / `Content:` markers in free text
///
/// Returns `None` when neither yields anything, including when a JSON
/// object is present but malformed and no markers exist. When only one of
/// the two fields is found, `policy` decides between a placeholder and
/// `None`.
///
/// # Examples
///
/// ```
/// use herald_models::{FieldPolicy, parse_generated_post};
///
/// let reply = "```json\n{\"title\":\"T\",\"content\":\"C\"}\n```";
/// let post = parse_generated_post(reply, FieldPolicy::Lenient).unwrap();
/// assert_eq!(post.title, "T");
/// assert_eq!(post.content, "C");
///
/// assert!(parse_generated_post("not json at all", FieldPolicy::Lenient).is_none());
/// ```
pub fn parse_generated_post(reply: &str, policy: FieldPolicy) -> Option<GeneratedPost> {
    let (title, content) = parse_json_fields(reply).or_else(|| extract_marked_fields(reply))?;
    complete_fields(title, content, policy)
}

fn parse_json_fields(reply: &str) -> Option<(Option<String>, Option<String>)> {
    let candidate = extract_json_object(reply)?;
    let value: serde_json::Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "Reply contained a malformed JSON object");
            return None;
        }
    };

    let field = |key: &str| {
        value
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };
    let fields = (field("title"), field("content"));
    // An unrelated object leaves the marker strategy to try
    (fields.0.is_some() || fields.1.is_some()).then_some(fields)
}

fn complete_fields(
    title: Option<String>,
    content: Option<String>,
    policy: FieldPolicy,
) -> Option<GeneratedPost> {
    match (title, content, policy) {
        (Some(title), Some(content), _) => Some(GeneratedPost::new(title, content)),
        (None, None, _) => None,
        (_, _, FieldPolicy::Strict) => {
            warn!("Generated reply is missing a required field");
            None
        }
        (title, content, FieldPolicy::Lenient) => {
            if title.is_none() {
                warn!("Generated reply has no title; using placeholder");
            }
            if content.is_none() {
                warn!("Generated reply has no content; using placeholder");
            }
            Some(GeneratedPost::new(
                title.unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
                content.unwrap_or_else(|| PLACEHOLDER_CONTENT.to_string()),
            ))
        }
    }
}

/// Generates posts for a pillar and post type using a text provider.
#[derive(Clone)]
pub struct ContentGenerator {
    provider: Arc<dyn TextGenerator>,
    policy: FieldPolicy,
}

impl std::fmt::Debug for ContentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentGenerator")
            .field("provider", &self.provider.provider_name())
            .field("model", &self.provider.model_name())
            .field("policy", &self.policy)
            .finish()
    }
}

impl ContentGenerator {
    /// Create a generator over `provider`.
    pub fn new(provider: Arc<dyn TextGenerator>, policy: FieldPolicy) -> Self {
        Self { provider, policy }
    }

    /// The missing-field policy in effect.
    pub fn policy(&self) -> FieldPolicy {
        self.policy
    }

    /// Generate a post about `pillar` in the style of `post_type`.
    ///
    /// # Errors
    ///
    /// Propagates provider failures unchanged. A reply that
    /// [`parse_generated_post`] cannot use becomes
    /// [`GenerationErrorKind::Unparsable`].
    #[instrument(
        skip(self),
        fields(provider = self.provider.provider_name(), model = %self.provider.model_name())
    )]
    pub async fn generate(&self, pillar: &str, post_type: PostType) -> HeraldResult<GeneratedPost> {
        let prompt = build_prompt(pillar, post_type);
        debug!(prompt_len = prompt.len(), "Requesting generation");

        let reply = self.provider.generate_text(&prompt).await?;

        match parse_generated_post(&reply, self.policy) {
            Some(post) => {
                info!(
                    title_len = post.title.len(),
                    content_len = post.content.len(),
                    "Post generated"
                );
                Ok(post)
            }
            None => {
                error!(reply_len = reply.len(), "Could not parse generated reply");
                Err(GenerationError::new(GenerationErrorKind::Unparsable {
                    length: reply.len(),
                })
                .into())
            }
        }
    }
}
