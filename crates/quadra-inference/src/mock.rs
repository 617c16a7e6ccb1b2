//! Deterministic mock generation backend for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use quadra_core::{Error, GenerationBackend, Result};

/// One recorded call to the mock backend.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub system: String,
    pub user: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default)]
struct MockConfig {
    default_response: String,
    /// Responses keyed by a substring of the user prompt.
    mapped_responses: Vec<(String, String)>,
    fail_with: Option<String>,
    delay_ms: u64,
}

/// Mock [`GenerationBackend`] with canned responses and a call log.
///
/// Fully deterministic: responses resolve by substring match on the user
/// prompt, and failures are opted into explicitly.
#[derive(Clone, Default)]
pub struct MockBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default().with_response(r#"{"category": "Resources", "folder_name": "General"}"#)
    }

    /// Set the default response for any prompt without a mapping.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Return `response` whenever the user prompt contains `needle`.
    pub fn with_mapped_response(
        mut self,
        needle: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .mapped_responses
            .push((needle.into(), response.into()));
        self
    }

    /// Make every call fail with the given message.
    pub fn fail_with(mut self, message: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).fail_with = Some(message.into());
        self
    }

    /// Sleep for the given duration before answering. Combined with a
    /// short classifier timeout this exercises the timeout path.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).delay_ms = delay_ms;
        self
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().expect("call log lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.call_log.lock().expect("call log lock").len()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn complete(&self, system: &str, user: &str, timeout_secs: u64) -> Result<String> {
        self.call_log.lock().expect("call log lock").push(MockCall {
            system: system.to_string(),
            user: user.to_string(),
            timeout_secs,
        });

        if self.config.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.delay_ms)).await;
        }

        if let Some(message) = &self.config.fail_with {
            return Err(Error::Inference(message.clone()));
        }

        for (needle, response) in &self.config.mapped_responses {
            if user.contains(needle.as_str()) {
                return Ok(response.clone());
            }
        }

        Ok(self.config.default_response.clone())
    }
}
