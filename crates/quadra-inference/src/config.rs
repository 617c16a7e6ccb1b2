//! Inference configuration with environment overrides.

use std::time::Duration;

use quadra_core::defaults;

/// Connection and timing configuration for the generation backend.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Base URL of the Ollama server.
    pub base_url: String,
    /// Generation model slug.
    pub model: String,
    /// Timeout for classification calls (seconds).
    pub gen_timeout_secs: u64,
    /// Timeout for general interpretation calls (seconds).
    pub interpret_timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::OLLAMA_URL.to_string(),
            model: defaults::GEN_MODEL.to_string(),
            gen_timeout_secs: defaults::GEN_TIMEOUT_SECS,
            interpret_timeout_secs: defaults::INTERPRET_TIMEOUT_SECS,
        }
    }
}

impl InferenceConfig {
    /// Build from environment variables, falling back to defaults.
    ///
    /// Recognized: `QUADRA_OLLAMA_URL`, `QUADRA_GEN_MODEL`,
    /// `QUADRA_GEN_TIMEOUT_SECS`, `QUADRA_INTERPRET_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("QUADRA_OLLAMA_URL").unwrap_or(defaults.base_url),
            model: std::env::var("QUADRA_GEN_MODEL").unwrap_or(defaults.model),
            gen_timeout_secs: std::env::var("QUADRA_GEN_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.gen_timeout_secs),
            interpret_timeout_secs: std::env::var("QUADRA_INTERPRET_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.interpret_timeout_secs),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_gen_timeout(mut self, secs: u64) -> Self {
        self.gen_timeout_secs = secs;
        self
    }

    pub fn gen_timeout(&self) -> Duration {
        Duration::from_secs(self.gen_timeout_secs)
    }
}
