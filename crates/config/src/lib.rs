//! Configuration loading, validation, and management for Draftsmith.
//!
//! Loads configuration from `~/.draftsmith/config.toml` with environment
//! variable overrides. Validates all settings at load time; a missing flow
//! credential is the one condition treated as fatal at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.draftsmith/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bearer credential for the hosted flow service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_api_key: Option<String>,

    /// Credential for the neural search service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_api_key: Option<String>,

    /// Base URL of the flow run endpoint.
    #[serde(default = "default_flow_base_url")]
    pub flow_base_url: String,

    /// Base URL of the search service.
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,

    /// Released flow ids, one per LLM-backed call.
    #[serde(default)]
    pub flows: FlowIds,

    /// Agent loop configuration.
    #[serde(default)]
    pub agent: AgentConfig,
}

fn default_flow_base_url() -> String {
    "https://app.wordware.ai/api/released-app".into()
}
fn default_search_base_url() -> String {
    "https://api.exa.ai".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("flow_api_key", &redact(&self.flow_api_key))
            .field("search_api_key", &redact(&self.search_api_key))
            .field("flow_base_url", &self.flow_base_url)
            .field("search_base_url", &self.search_base_url)
            .field("flows", &self.flows)
            .field("agent", &self.agent)
            .finish()
    }
}

/// The released flow ids for each LLM-backed call in the loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowIds {
    /// Produces the next thought from the run context.
    #[serde(default = "default_thinker")]
    pub thinker: String,

    /// Maps a thought to an action label.
    #[serde(default = "default_actor")]
    pub actor: String,

    /// Derives a search query from transcript + thought.
    #[serde(default = "default_query_writer")]
    pub query_writer: String,

    /// Condenses the transcript.
    #[serde(default = "default_summarizer")]
    pub summarizer: String,

    /// Drafts the essay.
    #[serde(default = "default_essay_writer")]
    pub essay_writer: String,
}

fn default_thinker() -> String {
    "9cd71fbb-7ded-49d6-8310-58051ac02b17".into()
}
fn default_actor() -> String {
    "2ad6d7ed-4969-4e75-b725-49a4634058a2".into()
}
fn default_query_writer() -> String {
    "b7576e08-9e07-4f18-bb89-0ee0661eabf9".into()
}
fn default_summarizer() -> String {
    "0a809bda-a4ed-40dd-a88d-d208a607546c".into()
}
fn default_essay_writer() -> String {
    "9dfa55a3-1880-4cdc-9569-2f9b791fa2f6".into()
}

impl Default for FlowIds {
    fn default() -> Self {
        Self {
            thinker: default_thinker(),
            actor: default_actor(),
            query_writer: default_query_writer(),
            summarizer: default_summarizer(),
            essay_writer: default_essay_writer(),
        }
    }
}

/// Agent loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum loop iterations before the run is cut off.
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,

    /// Per-request timeout for outbound HTTP calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Number of search results requested per research step.
    #[serde(default = "default_num_results")]
    pub num_results: usize,

    /// Search result category filter.
    #[serde(default = "default_search_category")]
    pub search_category: String,
}

fn default_max_steps() -> u32 {
    12
}
fn default_request_timeout_secs() -> u64 {
    120
}
fn default_num_results() -> usize {
    5
}
fn default_search_category() -> String {
    "research paper".into()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            request_timeout_secs: default_request_timeout_secs(),
            num_results: default_num_results(),
            search_category: default_search_category(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.draftsmith/config.toml).
    ///
    /// Also checks environment variables for credentials:
    /// - `DRAFTSMITH_FLOW_API_KEY`, falling back to `WORDWARE_API_KEY`
    /// - `DRAFTSMITH_SEARCH_API_KEY`, falling back to `EXA_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if let Ok(key) = std::env::var("DRAFTSMITH_FLOW_API_KEY") {
            config.flow_api_key = Some(key);
        } else if config.flow_api_key.is_none() {
            config.flow_api_key = std::env::var("WORDWARE_API_KEY").ok();
        }

        if let Ok(key) = std::env::var("DRAFTSMITH_SEARCH_API_KEY") {
            config.search_api_key = Some(key);
        } else if config.search_api_key.is_none() {
            config.search_api_key = std::env::var("EXA_API_KEY").ok();
        }

        if let Ok(url) = std::env::var("DRAFTSMITH_FLOW_BASE_URL") {
            config.flow_base_url = url;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".draftsmith")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.max_steps == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_steps must be at least 1".into(),
            ));
        }

        if self.agent.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "agent.request_timeout_secs must be at least 1".into(),
            ));
        }

        if self.agent.num_results == 0 || self.agent.num_results > 10 {
            return Err(ConfigError::ValidationError(
                "agent.num_results must be between 1 and 10".into(),
            ));
        }

        Ok(())
    }

    /// The flow credential, or the fatal startup error.
    ///
    /// Without it no forward progress is possible, so callers should treat
    /// this failing as terminal.
    pub fn require_flow_key(&self) -> Result<&str, ConfigError> {
        self.flow_api_key.as_deref().ok_or_else(|| {
            ConfigError::MissingCredential(
                "no flow API key: set DRAFTSMITH_FLOW_API_KEY or flow_api_key in config.toml"
                    .into(),
            )
        })
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            flow_api_key: None,
            search_api_key: None,
            flow_base_url: default_flow_base_url(),
            search_base_url: default_search_base_url(),
            flows: FlowIds::default(),
            agent: AgentConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),
}
