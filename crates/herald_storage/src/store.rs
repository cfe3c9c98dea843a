//! Configuration store trait definition.

use herald_error::HeraldResult;

/// Key under which the pillar list is stored unless configured otherwise.
pub const DEFAULT_PILLARS_KEY: &str = "pillars";

/// Read access to an external key-value store.
///
/// Implementations return the stored value as text, exactly as the backend
/// holds it, or `None` when the key does not exist. Interpreting the value
/// is left to [`crate::parse_pillars`].
#[async_trait::async_trait]
pub trait ConfigStore: Send + Sync {
    /// Fetch the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend cannot be reached or answers
    /// with anything other than a value or "not found".
    async fn get(&self, key: &str) -> HeraldResult<Option<String>>;

    /// Short backend identifier used in logs (e.g. "file", "cloudflare").
    fn backend_name(&self) -> &'static str;
}
