//! Provider trait for text generation backends.

use async_trait::async_trait;
use herald_error::HeraldResult;
use serde::{Deserialize, Serialize};

/// Sampling settings shared by every provider.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Upper bound on generated tokens
    pub max_tokens: Option<u32>,
}

/// Core trait that every text generation backend implements.
///
/// One prompt in, one block of text out. Providers own their transport,
/// authentication and envelope decoding; callers only see text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` and return the model's textual reply.
    ///
    /// # Errors
    ///
    /// Returns a generation error on transport failure, on a non-success
    /// HTTP status (carrying the remote body), or when the reply holds no
    /// text.
    async fn generate_text(&self, prompt: &str) -> HeraldResult<String>;

    /// Provider name (e.g., "openai", "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier.
    fn model_name(&self) -> &str;
}
