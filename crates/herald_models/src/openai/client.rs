use super::{ChatCompletionRequest, ChatCompletionResponse, Message};
use crate::{GenerationSettings, TextGenerator};
use herald_error::{GenerationError, GenerationErrorKind, HeraldResult};
use tracing::instrument;

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Clone, PartialEq)]
pub struct ChatCompletionsConfig {
    /// Base URL of the API (e.g., "https://api.openai.com")
    pub base_url: String,
    /// Model identifier to use for generation
    pub model: String,
    /// Bearer API key (local servers often need none)
    pub api_key: Option<String>,
    /// Sampling settings
    pub settings: GenerationSettings,
}

impl ChatCompletionsConfig {
    /// Create a new configuration
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            settings: GenerationSettings::default(),
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the sampling settings
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl std::fmt::Debug for ChatCompletionsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("settings", &self.settings)
            .finish()
    }
}

/// Client for OpenAI-compatible chat completion APIs
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    config: ChatCompletionsConfig,
    client: reqwest::Client,
}

impl ChatCompletionsClient {
    /// Create a new client with its own connection pool
    pub fn new(config: ChatCompletionsConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a new client sharing an existing connection pool
    #[instrument(skip(client, config), fields(base_url = %config.base_url, model = %config.model))]
    pub fn with_client(client: reqwest::Client, config: ChatCompletionsConfig) -> Self {
        tracing::debug!("Creating chat completions client");
        Self { config, client }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ChatCompletionsConfig {
        &self.config
    }

    /// Send a chat completion request
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, GenerationError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        tracing::debug!("Sending chat completion request to {}", url);

        let mut req = self.client.post(&url).json(request);

        if let Some(api_key) = &self.config.api_key {
            req = req.bearer_auth(api_key);
        }

        let response = req.send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            GenerationError::new(GenerationErrorKind::Http(format!("Request failed: {}", e)))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Provider returned error");
            return Err(GenerationError::new(GenerationErrorKind::Api {
                status: status.as_u16(),
                body,
            }));
        }

        let result = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            GenerationError::new(GenerationErrorKind::Decode(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        tracing::debug!("Chat completion successful");
        Ok(result)
    }
}

#[async_trait::async_trait]
impl TextGenerator for ChatCompletionsClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate_text(&self, prompt: &str) -> HeraldResult<String> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![Message::user(prompt)],
            max_tokens: self.config.settings.max_tokens,
            temperature: self.config.settings.temperature,
        };

        let response = self.chat_completion(&request).await?;

        response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse).into())
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
