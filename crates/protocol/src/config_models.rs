//! Global configuration models for `.maki/config.toml`.
//!
//! The default endpoint configuration is an explicit value that is handed to
//! the agent manager at construction time. There is no process-wide default.

use serde::Deserialize;
use serde::Serialize;

/// Which endpoint implementation serves an agent.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EndpointProvider {
    /// An Ollama-compatible HTTP server.
    #[default]
    Ollama,

    /// Returns the prompt unchanged. Useful for dry runs.
    Echo,
}

/// Connection settings for an LLM endpoint.
///
/// # Example
///
/// ```toml
/// [endpoint]
/// provider = "ollama"
/// url = "http://localhost"
/// port = 11434
/// model = "llama3"
/// temperature = 0.0
/// timeout-secs = 120
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct EndpointConfig {
    #[serde(default)]
    pub provider: EndpointProvider,

    /// Base URL including scheme, without port.
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature in `[0, 1]`.
    #[serde(default)]
    pub temperature: f32,

    /// Request timeout applied to every outbound call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    "http://localhost".to_string()
}

fn default_port() -> u16 {
    11434
}

fn default_model() -> String {
    "llama3".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            provider: EndpointProvider::default(),
            url: default_url(),
            port: default_port(),
            model: default_model(),
            temperature: 0.0,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EndpointConfig {
    /// Return a copy with the given model and temperature overrides applied.
    pub fn with_overrides(&self, model: Option<&str>, temperature: Option<f32>) -> Self {
        let mut config = self.clone();
        if let Some(model) = model {
            config.model = model.to_string();
        }
        if let Some(temperature) = temperature {
            config.temperature = temperature;
        }
        config
    }
}

/// Settings for multi-agent coordination.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct CoordinationSettings {
    /// Maximum number of endpoint calls in flight during parallel coordination.
    #[serde(default = "default_parallel_limit")]
    pub parallel_limit: usize,
}

fn default_parallel_limit() -> usize {
    4
}

impl Default for CoordinationSettings {
    fn default() -> Self {
        Self {
            parallel_limit: default_parallel_limit(),
        }
    }
}

/// Represents global settings from `.maki/config.toml`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GlobalConfig {
    /// Endpoint used by agents that do not override it.
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub coordination: CoordinationSettings,
}
