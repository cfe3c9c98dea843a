//! In-process configuration store.

use crate::ConfigStore;
use herald_core::Pillar;
use herald_error::{HeraldResult, JsonError};
use std::collections::HashMap;

/// Configuration store backed by a `HashMap`.
///
/// Values are fixed at construction time, matching the read-only view the
/// pipeline has of every store.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    values: HashMap<String, String>,
}

impl MemoryConfigStore {
    /// Create an empty store. Every lookup returns `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw value under `key`.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Store `pillars` under `key` in the tagged JSON format.
    pub fn with_pillars(self, key: impl Into<String>, pillars: &[Pillar]) -> HeraldResult<Self> {
        let raw = serde_json::to_string(pillars).map_err(|e| JsonError::new(e.to_string()))?;
        Ok(self.with_value(key, raw))
    }
}

#[async_trait::async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn get(&self, key: &str) -> HeraldResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
