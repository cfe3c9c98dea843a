//! The enumerated set of post formats a run can request.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Format of the post to generate.
///
/// Callers choose from this fixed set instead of passing free text, so
/// nothing user-supplied beyond a known label reaches the prompt.
///
/// # Examples
///
/// ```
/// use herald_core::PostType;
/// use std::str::FromStr;
///
/// assert_eq!(PostType::from_str("Question").unwrap(), PostType::Question);
/// assert_eq!(PostType::Tip.to_string(), "tip");
/// assert!(PostType::from_str("manifesto").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PostType {
    /// Open-ended prompt inviting community discussion
    Discussion,
    /// A single question for readers to answer
    Question,
    /// A practical, actionable tip
    Tip,
    /// A short illustrative story
    Story,
    /// A reflective piece ending with a journaling prompt
    Reflection,
}

impl PostType {
    /// Every supported post type, in declaration order.
    pub fn all() -> Vec<PostType> {
        PostType::iter().collect()
    }

    /// Comma-separated list of accepted labels, for error messages.
    pub fn expected_labels() -> String {
        PostType::iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Writing guidance included in the generation prompt.
    pub fn guidance(&self) -> &'static str {
        match self {
            PostType::Discussion => {
                "Open a discussion: share a perspective and end with an open question for the community."
            }
            PostType::Question => {
                "Ask the community one focused question, with two or three sentences of context."
            }
            PostType::Tip => {
                "Share one practical, actionable tip with a short explanation of why it helps."
            }
            PostType::Story => {
                "Tell a short, relatable story (under 250 words) that illustrates the theme."
            }
            PostType::Reflection => {
                "Write a brief reflection on the theme and close with a journaling prompt."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(PostType::from_str("DISCUSSION").unwrap(), PostType::Discussion);
        assert_eq!(PostType::from_str("reflection").unwrap(), PostType::Reflection);
    }

    #[test]
    fn test_all_lists_five_types() {
        assert_eq!(PostType::all().len(), 5);
        assert_eq!(
            PostType::expected_labels(),
            "discussion, question, tip, story, reflection"
        );
    }

    #[test]
    fn test_serde_uses_lowercase_labels() {
        let json = serde_json::to_string(&PostType::Story).unwrap();
        assert_eq!(json, "\"story\"");
    }
}
