//! Content pillars.

use serde::{Deserialize, Serialize};

/// A named content theme with an optional platform category tag (flair).
///
/// # Examples
///
/// ```
/// use herald_core::Pillar;
///
/// let pillar: Pillar = serde_json::from_str(r#"{"name":"Resilience","flairId":"X"}"#).unwrap();
/// assert_eq!(pillar.name, "Resilience");
/// assert_eq!(pillar.category_tag.as_deref(), Some("X"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", name)]
pub struct Pillar {
    /// Display name, also used verbatim (after sanitizing) in the prompt
    pub name: String,
    /// Platform flair id attached to posts for this pillar
    #[serde(
        rename = "flairId",
        alias = "categoryTag",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category_tag: Option<String>,
}

impl Pillar {
    /// Create a pillar without a category tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category_tag: None,
        }
    }

    /// Attach a category tag.
    pub fn with_category_tag(mut self, tag: impl Into<String>) -> Self {
        self.category_tag = Some(tag.into());
        self
    }
}

/// The standard five pillars used when the configuration store has none.
///
/// Callers pass this list into the dispatcher explicitly; nothing reads it
/// implicitly.
pub fn default_pillars() -> Vec<Pillar> {
    ["Resilience", "Mindfulness", "Growth", "Connection", "Purpose"]
        .into_iter()
        .map(Pillar::new)
        .collect()
}

/// Look up a pillar by name.
///
/// An exact match wins; otherwise the first case-insensitive match is
/// returned.
///
/// ```
/// use herald_core::{Pillar, find_pillar};
///
/// let pillars = vec![Pillar::new("Growth"), Pillar::new("Purpose")];
/// assert_eq!(find_pillar(&pillars, "purpose").map(|p| p.name.as_str()), Some("Purpose"));
/// assert!(find_pillar(&pillars, "Chaos").is_none());
/// ```
pub fn find_pillar<'a>(pillars: &'a [Pillar], name: &str) -> Option<&'a Pillar> {
    let wanted = name.trim();
    pillars
        .iter()
        .find(|p| p.name == wanted)
        .or_else(|| pillars.iter().find(|p| p.name.eq_ignore_ascii_case(wanted)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pillars_has_five_untagged_entries() {
        let pillars = default_pillars();
        assert_eq!(pillars.len(), 5);
        assert!(pillars.iter().all(|p| p.category_tag.is_none()));
        assert_eq!(pillars[0].name, "Resilience");
    }

    #[test]
    fn test_find_pillar_prefers_exact_match() {
        let pillars = vec![
            Pillar::new("growth").with_category_tag("lower"),
            Pillar::new("Growth").with_category_tag("upper"),
        ];
        let found = find_pillar(&pillars, "Growth").unwrap();
        assert_eq!(found.category_tag.as_deref(), Some("upper"));
    }

    #[test]
    fn test_pillar_serializes_tag_as_flair_id() {
        let json = serde_json::to_value(Pillar::new("Purpose").with_category_tag("abc")).unwrap();
        assert_eq!(json["flairId"], "abc");

        let untagged = serde_json::to_value(Pillar::new("Purpose")).unwrap();
        assert!(untagged.get("flairId").is_none());
    }
}
