//! Build pipeline components from a validated [`HeraldConfig`].

use crate::{HeraldConfig, HttpSection, Pipeline, ProviderKind, StoreBackend};
use herald_core::default_pillars;
use herald_error::{ConfigError, HeraldError, HeraldResult};
use herald_models::{
    ChatCompletionsClient, ChatCompletionsConfig, ContentGenerator, GeminiClient, GeminiConfig,
    GenerationSettings, TextGenerator,
};
use herald_social::{PostPlatform, RedditClient, RedditConfig, RedditCredentials};
use herald_storage::{
    CloudflareKvConfig, CloudflareKvStore, ConfigStore, FileConfigStore, MemoryConfigStore,
};
use std::sync::Arc;
use tracing::{debug, info};

fn field(value: &Option<String>, name: &str) -> HeraldResult<String> {
    value
        .clone()
        .ok_or_else(|| HeraldError::from(ConfigError::missing_field(name)))
}

/// Shared HTTP client for every outbound call.
pub fn build_http_client(http: &HttpSection) -> HeraldResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = http.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|e| {
        HeraldError::from(ConfigError::new(format!(
            "Failed to build HTTP client: {}",
            e
        )))
    })
}

/// Configuration store for the configured backend.
pub fn build_store(
    config: &HeraldConfig,
    client: &reqwest::Client,
) -> HeraldResult<Arc<dyn ConfigStore>> {
    let store = &config.store;
    let built: Arc<dyn ConfigStore> = match store.backend {
        StoreBackend::Memory => {
            let mut memory = MemoryConfigStore::new();
            if let Some(inline) = &store.inline {
                memory = memory.with_value(store.key.clone(), inline.clone());
            }
            Arc::new(memory)
        }
        StoreBackend::File => {
            let path = store
                .path
                .clone()
                .ok_or_else(|| HeraldError::from(ConfigError::missing_field("store.path")))?;
            Arc::new(FileConfigStore::new(path))
        }
        StoreBackend::Cloudflare => Arc::new(CloudflareKvStore::with_client(
            client.clone(),
            CloudflareKvConfig {
                account_id: field(&store.account_id, "store.account_id")?,
                namespace_id: field(&store.namespace_id, "store.namespace_id")?,
                api_token: field(&store.api_token, "store.api_token")?,
                api_base_url: store.api_base_url.clone(),
            },
        )),
    };
    debug!(backend = built.backend_name(), "Built configuration store");
    Ok(built)
}

/// Text generation provider for the configured backend.
pub fn build_text_generator(
    config: &HeraldConfig,
    client: &reqwest::Client,
) -> HeraldResult<Arc<dyn TextGenerator>> {
    let generator = &config.generator;
    let settings = GenerationSettings {
        temperature: generator.temperature,
        max_tokens: generator.max_tokens,
    };
    let base_url = generator.effective_base_url();

    let provider: Arc<dyn TextGenerator> = match generator.provider {
        ProviderKind::Openai => {
            let mut chat = ChatCompletionsConfig::new(base_url, generator.model.clone())
                .with_settings(settings);
            if let Some(key) = &generator.api_key {
                chat = chat.with_api_key(key.clone());
            }
            Arc::new(ChatCompletionsClient::with_client(client.clone(), chat))
        }
        ProviderKind::Gemini => {
            let gemini = GeminiConfig::new(
                generator.model.clone(),
                field(&generator.api_key, "generator.api_key")?,
            )
            .with_base_url(base_url)
            .with_settings(settings);
            Arc::new(GeminiClient::with_client(client.clone(), gemini))
        }
    };
    Ok(provider)
}

/// Reddit client for the configured account and subreddit.
pub fn build_platform(
    config: &HeraldConfig,
    client: &reqwest::Client,
) -> HeraldResult<Arc<dyn PostPlatform>> {
    let reddit = &config.reddit;
    let credentials = RedditCredentials {
        client_id: field(&reddit.client_id, "reddit.client_id")?,
        client_secret: field(&reddit.client_secret, "reddit.client_secret")?,
        username: field(&reddit.username, "reddit.username")?,
        password: field(&reddit.password, "reddit.password")?,
    };
    let reddit_config = RedditConfig::new(
        credentials,
        reddit.user_agent.clone(),
        field(&reddit.subreddit, "reddit.subreddit")?,
    )
    .with_base_urls(reddit.auth_base_url.clone(), reddit.api_base_url.clone());
    Ok(Arc::new(RedditClient::with_client(client.clone(), reddit_config)))
}

/// Validate `config` and assemble a pipeline with the standard fallback
/// pillars.
pub fn build_pipeline(config: &HeraldConfig) -> HeraldResult<Pipeline> {
    config.validate()?;

    let client = build_http_client(&config.http)?;
    let store = build_store(config, &client)?;
    let provider = build_text_generator(config, &client)?;
    let platform = build_platform(config, &client)?;

    info!(
        store = store.backend_name(),
        provider = provider.provider_name(),
        model = provider.model_name(),
        target = platform.target(),
        "Pipeline assembled"
    );

    let generator = ContentGenerator::new(provider, config.generator.field_policy);
    Ok(Pipeline::new(store, generator, platform, default_pillars())
        .with_pillars_key(config.store.key.clone()))
}
