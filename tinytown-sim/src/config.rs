//! Application configuration — the engine sections plus an `[llm]` block.
//!
//! Everything defaults: a missing or empty `tinytown.toml` runs the
//! canonical scenario offline (provider "none").

use serde::{Deserialize, Serialize};
use std::path::Path;

use tinytown_core::SimConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Engine configuration (thresholds, metabolism, schedule).
    #[serde(flatten)]
    pub sim: SimConfig,
    /// LLM backend configuration.
    #[serde(default)]
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Load from a TOML file, or fall back to defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                Ok(toml::from_str(&content)?)
            }
            None => Ok(Self::default()),
        }
    }
}

/// LLM backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider: "ollama", "openai", "none".
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL for the LLM API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// API key for OpenAI-compatible providers.
    #[serde(default)]
    pub api_key: String,
    /// Hard timeout for any LLM call in milliseconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_ms: u64,
    /// HTTP retries before giving the hour to the random fallback.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "none".to_string(),
            base_url: "http://localhost:11434".to_string(),
            model: "gemma3:4b".to_string(),
            api_key: String::new(),
            request_timeout_ms: 10_000,
            max_retries: 1,
        }
    }
}

fn default_provider() -> String {
    "none".to_string()
}
fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}
fn default_model() -> String {
    "gemma3:4b".to_string()
}
fn default_timeout() -> u64 {
    10_000
}
fn default_retries() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_run_offline() {
        let config = AppConfig::default();
        assert_eq!(config.llm.provider, "none");
        assert_eq!(config.sim.schedule.hours_per_day, 24);
    }

    #[test]
    fn toml_sections_flatten_into_one_file() {
        let config: AppConfig = toml::from_str(
            "[thresholds]\nfood = 25\n\n[llm]\nprovider = \"ollama\"\nmodel = \"qwen2.5:1.5b\"\n",
        )
        .expect("valid");
        assert_eq!(config.sim.thresholds.food, 25);
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.model, "qwen2.5:1.5b");
        assert_eq!(config.llm.max_retries, 1);
    }
}
