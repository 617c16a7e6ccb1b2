//! Ollama generation backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use quadra_core::{Error, GenerationBackend, Result};

use crate::config::InferenceConfig;

/// Generation backend talking to an Ollama server's chat API.
pub struct OllamaBackend {
    client: Client,
    config: InferenceConfig,
}

impl OllamaBackend {
    /// Create a backend from explicit configuration.
    pub fn new(config: InferenceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.gen_timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            "Initializing Ollama backend"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables (see [`InferenceConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        Self::new(InferenceConfig::from_env())
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[async_trait]
impl GenerationBackend for OllamaBackend {
    async fn complete(&self, system: &str, user: &str, timeout_secs: u64) -> Result<String> {
        let start = Instant::now();

        let mut messages = Vec::new();
        if !system.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: user.to_string(),
        });

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            stream: false,
            // Classification needs reproducible output.
            options: ChatOptions { temperature: 0.0 },
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.config.base_url))
            .timeout(Duration::from_secs(timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Invalid chat response: {}", e)))?;

        debug!(
            model = %self.config.model,
            duration_ms = start.elapsed().as_millis() as u64,
            response_len = parsed.message.content.len(),
            "Generation complete"
        );

        Ok(parsed.message.content)
    }
}
