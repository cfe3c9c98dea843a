//! Typed configuration for the Herald bot.
//!
//! Values are layered with the `config` crate: an optional TOML file first,
//! then environment variables prefixed `HERALD` with `__` between
//! segments, e.g. `HERALD__REDDIT__CLIENT_SECRET`.
//!
//! # Example
//!
//! ```toml
//! [reddit]
//! client_id = "abc"
//! client_secret = "shh"
//! username = "herald_bot"
//! password = "hunter2"
//! subreddit = "wellbeing"
//!
//! [generator]
//! provider = "gemini"
//! api_key = "..."
//! model = "gemini-2.0-flash"
//!
//! [store]
//! backend = "file"
//! path = "pillars.json"
//!
//! [schedule]
//! cron = "0 0 9 * * * *"
//! ```

use crate::ScheduleType;
use config::{Config, Environment, File, FileFormat};
use herald_error::{ConfigError, HeraldError, HeraldResult};
use herald_models::FieldPolicy;
use herald_social::{REDDIT_API_BASE, REDDIT_AUTH_BASE};
use herald_storage::{CLOUDFLARE_API_BASE, DEFAULT_PILLARS_KEY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Default listen address for the HTTP API.
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Default posting schedule: every day at 09:00 UTC.
pub const DEFAULT_CRON: &str = "0 0 9 * * * *";

/// Default OpenAI-compatible endpoint.
const OPENAI_API_BASE: &str = "https://api.openai.com";

fn redact(value: &Option<String>) -> &'static str {
    match value {
        Some(v) if !v.is_empty() => "<redacted>",
        _ => "<unset>",
    }
}

/// Fetch a required string, treating blank values as missing.
fn require<'a>(field: &str, value: &'a Option<String>) -> HeraldResult<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| HeraldError::from(ConfigError::missing_field(field)))
}

/// Complete bot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeraldConfig {
    /// Reddit credentials and target
    pub reddit: RedditSection,
    /// Text generation provider
    pub generator: GeneratorSection,
    /// Configuration store holding the pillar list
    pub store: StoreSection,
    /// HTTP API
    pub server: ServerSection,
    /// Internal timer
    pub schedule: ScheduleSection,
    /// Outbound HTTP client
    pub http: HttpSection,
    /// Logging
    pub log: LogSection,
}

/// `[reddit]` section.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditSection {
    /// Script app id
    pub client_id: Option<String>,
    /// Script app secret
    pub client_secret: Option<String>,
    /// Account username
    pub username: Option<String>,
    /// Account password
    pub password: Option<String>,
    /// User-Agent for every Reddit request
    pub user_agent: String,
    /// Target subreddit
    pub subreddit: Option<String>,
    /// Token endpoint base URL
    pub auth_base_url: String,
    /// Authenticated API base URL
    pub api_base_url: String,
}

impl Default for RedditSection {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            username: None,
            password: None,
            user_agent: format!("herald/{}", env!("CARGO_PKG_VERSION")),
            subreddit: None,
            auth_base_url: REDDIT_AUTH_BASE.to_string(),
            api_base_url: REDDIT_API_BASE.to_string(),
        }
    }
}

impl std::fmt::Debug for RedditSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditSection")
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("user_agent", &self.user_agent)
            .field("subreddit", &self.subreddit)
            .field("auth_base_url", &self.auth_base_url)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Supported text generation providers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    /// OpenAI chat completions, or any compatible server
    #[default]
    Openai,
    /// Google Gemini `generateContent`
    Gemini,
}

/// `[generator]` section.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSection {
    /// Provider to call
    pub provider: ProviderKind,
    /// Provider API key
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Override for the provider's base URL
    pub base_url: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Upper bound on generated tokens
    pub max_tokens: Option<u32>,
    /// What to do when the reply lacks a title or content
    pub field_policy: FieldPolicy,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Openai,
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: None,
            temperature: Some(0.8),
            max_tokens: Some(800),
            field_policy: FieldPolicy::Lenient,
        }
    }
}

impl std::fmt::Debug for GeneratorSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorSection")
            .field("provider", &self.provider)
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("field_policy", &self.field_policy)
            .finish()
    }
}

impl GeneratorSection {
    /// Base URL to call, falling back to the provider's public endpoint.
    pub fn effective_base_url(&self) -> String {
        match (&self.base_url, self.provider) {
            (Some(url), _) if !url.trim().is_empty() => url.trim().to_string(),
            (_, ProviderKind::Openai) => OPENAI_API_BASE.to_string(),
            (_, ProviderKind::Gemini) => herald_models::GEMINI_API_BASE.to_string(),
        }
    }
}

/// Configuration store backends.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreBackend {
    /// Pillars given inline as `store.inline`, or none
    #[default]
    Memory,
    /// Local JSON object file
    File,
    /// Cloudflare Workers KV
    Cloudflare,
}

/// `[store]` section.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Backend to read from
    pub backend: StoreBackend,
    /// Key holding the pillar list
    pub key: String,
    /// JSON file path (`file` backend)
    pub path: Option<PathBuf>,
    /// Pillar list as a JSON string (`memory` backend), same format as
    /// the stored value
    pub inline: Option<String>,
    /// Cloudflare account id
    pub account_id: Option<String>,
    /// KV namespace id
    pub namespace_id: Option<String>,
    /// Cloudflare API token
    pub api_token: Option<String>,
    /// Cloudflare API base URL
    pub api_base_url: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            key: DEFAULT_PILLARS_KEY.to_string(),
            path: None,
            inline: None,
            account_id: None,
            namespace_id: None,
            api_token: None,
            api_base_url: CLOUDFLARE_API_BASE.to_string(),
        }
    }
}

impl std::fmt::Debug for StoreSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSection")
            .field("backend", &self.backend)
            .field("key", &self.key)
            .field("path", &self.path)
            .field("inline", &self.inline)
            .field("account_id", &self.account_id)
            .field("namespace_id", &self.namespace_id)
            .field("api_token", &redact(&self.api_token))
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Listen address
    pub bind: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// `[schedule]` section.
///
/// `cron` wins over `interval_seconds`; with neither set the bot posts
/// daily per [`DEFAULT_CRON`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSection {
    /// Run the internal timer under `herald serve`
    pub enabled: bool,
    /// 7-field cron expression (sec min hour day month weekday year)
    pub cron: Option<String>,
    /// Fixed interval between runs
    pub interval_seconds: Option<u64>,
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            enabled: true,
            cron: None,
            interval_seconds: None,
        }
    }
}

impl ScheduleSection {
    /// The schedule this section describes.
    pub fn schedule_type(&self) -> ScheduleType {
        match (&self.cron, self.interval_seconds) {
            (Some(expression), _) if !expression.trim().is_empty() => ScheduleType::Cron {
                expression: expression.trim().to_string(),
            },
            (_, Some(seconds)) => ScheduleType::Interval { seconds },
            _ => ScheduleType::Cron {
                expression: DEFAULT_CRON.to_string(),
            },
        }
    }
}

/// `[http]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    /// Client-wide request timeout; unset means no timeout
    pub timeout_secs: Option<u64>,
}

impl HttpSection {
    /// Timeout as a duration.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// `[log]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of text
    pub json: bool,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl HeraldConfig {
    /// Load configuration from `path` (if given) and the environment.
    ///
    /// An explicitly given file must exist; without one, `herald.toml` in
    /// the working directory is used when present.
    #[instrument]
    pub fn load(path: Option<&Path>) -> HeraldResult<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("herald").required(false),
        };

        let builder = Config::builder().add_source(file).add_source(
            Environment::with_prefix("HERALD")
                .separator("__")
                .try_parsing(true),
        );

        let config = Self::deserialize_from(builder)?;
        debug!(
            backend = %config.store.backend,
            provider = %config.generator.provider,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Parse configuration from a TOML string, ignoring the environment.
    pub fn from_toml_str(toml: &str) -> HeraldResult<Self> {
        Self::deserialize_from(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn deserialize_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> HeraldResult<Self> {
        builder
            .build()
            .map_err(|e| {
                HeraldError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                HeraldError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Check required fields, failing on the first one missing.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the field, e.g.
    /// ``missing required field `reddit.client_id` ``.
    pub fn validate(&self) -> HeraldResult<()> {
        require("reddit.client_id", &self.reddit.client_id)?;
        require("reddit.client_secret", &self.reddit.client_secret)?;
        require("reddit.username", &self.reddit.username)?;
        require("reddit.password", &self.reddit.password)?;
        require("reddit.subreddit", &self.reddit.subreddit)?;
        if self.reddit.user_agent.trim().is_empty() {
            return Err(ConfigError::missing_field("reddit.user_agent").into());
        }

        // OpenAI-compatible servers behind a custom base URL may not need a key
        let key_required = match self.generator.provider {
            ProviderKind::Gemini => true,
            ProviderKind::Openai => self.generator.base_url.is_none(),
        };
        if key_required {
            require("generator.api_key", &self.generator.api_key)?;
        }
        if self.generator.model.trim().is_empty() {
            return Err(ConfigError::missing_field("generator.model").into());
        }

        if self.store.key.trim().is_empty() {
            return Err(ConfigError::missing_field("store.key").into());
        }
        match self.store.backend {
            StoreBackend::Memory => {}
            StoreBackend::File => {
                if self.store.path.is_none() {
                    return Err(ConfigError::missing_field("store.path").into());
                }
            }
            StoreBackend::Cloudflare => {
                require("store.account_id", &self.store.account_id)?;
                require("store.namespace_id", &self.store.namespace_id)?;
                require("store.api_token", &self.store.api_token)?;
            }
        }

        if self.server.bind.trim().is_empty() {
            return Err(ConfigError::missing_field("server.bind").into());
        }

        if self.schedule.enabled {
            self.schedule
                .schedule_type()
                .validate()
                .map_err(|message| {
                    HeraldError::from(ConfigError::new(format!("invalid `schedule`: {}", message)))
                })?;
        }

        Ok(())
    }
}
