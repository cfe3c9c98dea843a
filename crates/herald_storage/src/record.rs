//! Decoding of the stored pillar list.

use crate::ConfigStore;
use herald_core::Pillar;
use herald_error::{HeraldResult, StoreError, StoreErrorKind};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// One entry of the stored array, in either supported format.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredPillar {
    /// `{"name": "...", "flairId": "..."}`
    Tagged(Pillar),
    /// Legacy format: a bare pillar name
    Legacy(String),
}

impl From<StoredPillar> for Pillar {
    fn from(stored: StoredPillar) -> Self {
        match stored {
            StoredPillar::Tagged(pillar) => pillar,
            StoredPillar::Legacy(name) => Pillar::new(name),
        }
    }
}

/// Parse a stored pillar list.
///
/// Accepts an array of `{name, flairId}` objects, the legacy array of
/// strings, or a mix of both. Names are trimmed, blank entries are dropped,
/// and an empty `flairId` counts as no tag.
///
/// # Errors
///
/// Returns [`StoreErrorKind::Parse`] if the value is not a JSON array of
/// either form.
///
/// # Examples
///
/// ```
/// use herald_storage::parse_pillars;
///
/// let pillars = parse_pillars(r#"[{"name":"Resilience","flairId":"X"},"Growth"]"#).unwrap();
/// assert_eq!(pillars.len(), 2);
/// assert_eq!(pillars[0].category_tag.as_deref(), Some("X"));
/// assert!(pillars[1].category_tag.is_none());
/// ```
pub fn parse_pillars(raw: &str) -> HeraldResult<Vec<Pillar>> {
    let entries: Vec<StoredPillar> = serde_json::from_str(raw).map_err(|e| {
        StoreError::new(StoreErrorKind::Parse(format!(
            "expected an array of pillars: {}",
            e
        )))
    })?;

    let pillars = entries
        .into_iter()
        .map(Pillar::from)
        .filter_map(|mut pillar| {
            pillar.name = pillar.name.trim().to_string();
            if pillar.name.is_empty() {
                warn!("Skipping stored pillar with blank name");
                return None;
            }
            pillar.category_tag = pillar
                .category_tag
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty());
            Some(pillar)
        })
        .collect();

    Ok(pillars)
}

/// Read and decode the pillar list stored under `key`.
///
/// Returns `Ok(None)` when the key is absent so the caller can decide on a
/// fallback.
#[instrument(skip(store), fields(backend = store.backend_name()))]
pub async fn load_pillars(store: &dyn ConfigStore, key: &str) -> HeraldResult<Option<Vec<Pillar>>> {
    let Some(raw) = store.get(key).await? else {
        debug!("No pillar list stored");
        return Ok(None);
    };

    let pillars = parse_pillars(&raw)?;
    debug!(count = pillars.len(), "Loaded pillar list");
    Ok(Some(pillars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_pillars() {
        let pillars =
            parse_pillars(r#"[{"name":"Resilience","flairId":"X"},{"name":"Purpose"}]"#).unwrap();
        assert_eq!(pillars, vec![
            Pillar::new("Resilience").with_category_tag("X"),
            Pillar::new("Purpose"),
        ]);
    }

    #[test]
    fn test_parse_legacy_strings() {
        let pillars = parse_pillars(r#"["Growth", "Connection"]"#).unwrap();
        assert_eq!(pillars, vec![Pillar::new("Growth"), Pillar::new("Connection")]);
    }

    #[test]
    fn test_blank_names_and_tags_are_dropped() {
        let pillars = parse_pillars(r#"["  ", {"name":" Growth ","flairId":""}]"#).unwrap();
        assert_eq!(pillars, vec![Pillar::new("Growth")]);
    }

    #[test]
    fn test_non_array_is_a_parse_error() {
        let err = parse_pillars(r#"{"name":"Growth"}"#).unwrap_err();
        assert!(err.to_string().contains("expected an array"));
    }
}
