//! Configuration schema for the mindmap service.

use crate::ConfigError;
pub use mindmap_rs_protocol::SamplingConfig;
use serde::{Deserialize, Serialize};

/// Root config for the mindmap service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MindmapConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl MindmapConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> MindmapConfigBuilder {
        MindmapConfigBuilder::new()
    }
}

/// Builder for assembling a `MindmapConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct MindmapConfigBuilder {
    config: MindmapConfig,
}

impl MindmapConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: MindmapConfig::default(),
        }
    }

    /// Replace the model backend configuration.
    pub fn backend(mut self, backend: BackendConfig) -> Self {
        self.config.backend = backend;
        self
    }

    /// Replace the sampling parameters.
    pub fn sampling(mut self, sampling: SamplingConfig) -> Self {
        self.config.sampling = sampling;
        self
    }

    /// Replace the pipeline configuration.
    pub fn pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.config.pipeline = pipeline;
        self
    }

    /// Finalize and return the built `MindmapConfig`.
    pub fn build(self) -> MindmapConfig {
        self.config
    }
}

/// Connection settings for an OpenAI-compatible chat completion server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL up to and including the API version, e.g. `http://localhost:8000/v1`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name served by the backend.
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding a bearer token, if the server wants one.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/v1".to_string()
}

fn default_model() -> String {
    "mistralai/Mistral-7B-Instruct-v0.3".to_string()
}

/// How much the pipeline checks the generated payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Return the sanitized text as-is.
    #[default]
    Lenient,
    /// Parse and check the character graph before returning it.
    Strict,
}

/// Pipeline behavior toggles.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    #[serde(default)]
    pub validation: ValidationMode,
}

impl MindmapConfig {
    /// Check ranges and required values serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::invalid_field(
                "backend.base_url",
                "must not be empty",
            ));
        }
        if self.backend.model.trim().is_empty() {
            return Err(ConfigError::invalid_field(
                "backend.model",
                "must not be empty",
            ));
        }
        let SamplingConfig {
            temperature,
            top_p,
            max_tokens,
        } = self.sampling;
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(ConfigError::invalid_field(
                "sampling.temperature",
                "must be a finite number >= 0",
            ));
        }
        if !(top_p > 0.0 && top_p <= 1.0) {
            return Err(ConfigError::invalid_field(
                "sampling.top_p",
                "must be in (0, 1]",
            ));
        }
        if max_tokens == 0 {
            return Err(ConfigError::invalid_field(
                "sampling.max_tokens",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}
