//! Cloudflare Workers KV configuration store.

use crate::ConfigStore;
use herald_error::{HeraldResult, StoreError, StoreErrorKind};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, error, instrument};

/// Default Cloudflare API base URL.
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Connection settings for a Workers KV namespace.
#[derive(Clone)]
pub struct CloudflareKvConfig {
    /// Cloudflare account id
    pub account_id: String,
    /// KV namespace id
    pub namespace_id: String,
    /// API token with `Workers KV Storage:Read`
    pub api_token: String,
    /// API base URL, overridable for testing
    pub api_base_url: String,
}

impl std::fmt::Debug for CloudflareKvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareKvConfig")
            .field("account_id", &self.account_id)
            .field("namespace_id", &self.namespace_id)
            .field("api_token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Reads values from a Workers KV namespace over the REST API.
#[derive(Debug, Clone)]
pub struct CloudflareKvStore {
    client: Client,
    config: CloudflareKvConfig,
}

impl CloudflareKvStore {
    /// Create a store using its own HTTP client.
    pub fn new(config: CloudflareKvConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Create a store sharing an existing HTTP client.
    pub fn with_client(client: Client, config: CloudflareKvConfig) -> Self {
        debug!(namespace = %config.namespace_id, "Creating Cloudflare KV store");
        Self { client, config }
    }

    /// Each path component is percent-encoded, so keys may contain `/`, `?` or `#`.
    fn value_url(&self, key: &str) -> Result<Url, StoreError> {
        let invalid = |reason: String| StoreError::new(StoreErrorKind::InvalidUrl(reason));
        let mut url = Url::parse(&self.config.api_base_url)
            .map_err(|e| invalid(format!("{}: {}", self.config.api_base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| invalid(format!("{} cannot be a base", self.config.api_base_url)))?
            .pop_if_empty()
            .extend([
                "accounts",
                self.config.account_id.as_str(),
                "storage",
                "kv",
                "namespaces",
                self.config.namespace_id.as_str(),
                "values",
                key,
            ]);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl ConfigStore for CloudflareKvStore {
    #[instrument(skip(self), fields(namespace = %self.config.namespace_id))]
    async fn get(&self, key: &str) -> HeraldResult<Option<String>> {
        let url = self.value_url(key)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.api_token)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to reach Cloudflare KV");
                StoreError::new(StoreErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Key not found in KV namespace");
            return Ok(None);
        }

        let body = response.text().await.map_err(|e| {
            StoreError::new(StoreErrorKind::Http(format!("Failed to read body: {}", e)))
        })?;

        if !status.is_success() {
            error!(status = %status, body = %body, "Cloudflare KV returned error");
            return Err(StoreError::new(StoreErrorKind::Api {
                status: status.as_u16(),
                body,
            })
            .into());
        }

        Ok(Some(body))
    }

    fn backend_name(&self) -> &'static str {
        "cloudflare"
    }
}
