//! File-backed configuration store.

use crate::ConfigStore;
use herald_error::{HeraldResult, StoreError, StoreErrorKind};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Configuration store reading a JSON object file.
///
/// The file maps keys to values. A value may be embedded JSON or a string
/// holding serialized JSON, as a KV export would produce:
///
/// ```json
/// {
///   "pillars": [{"name": "Resilience", "flairId": "abc"}, "Growth"]
/// }
/// ```
///
/// The file is read on every lookup so edits take effect on the next run.
/// A missing file behaves like an empty store.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Create a store over `path`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl ConfigStore for FileConfigStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn get(&self, key: &str) -> HeraldResult<Option<String>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Store file does not exist");
                return Ok(None);
            }
            Err(e) => {
                return Err(StoreError::new(StoreErrorKind::Io(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
                .into());
            }
        };

        let mut values: HashMap<String, serde_json::Value> = serde_json::from_str(&text)
            .map_err(|e| {
                StoreError::new(StoreErrorKind::Parse(format!(
                    "{} is not a JSON object: {}",
                    self.path.display(),
                    e
                )))
            })?;

        Ok(values.remove(key).map(|value| match value {
            serde_json::Value::String(raw) => raw,
            other => other.to_string(),
        }))
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
