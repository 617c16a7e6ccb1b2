//! # quadra-inference
//!
//! LLM side of the hybrid classifier: the Ollama generation backend, a
//! deterministic mock for tests, permissive JSON extraction, the PARA
//! classification prompts, and the classifier adapter that turns a raw
//! model response into a normalized [`quadra_core::Verdict`].

pub mod classifier;
pub mod config;
pub mod json;
pub mod mock;
pub mod ollama;
pub mod prompts;

pub use classifier::{LlmClassifier, PromptKind};
pub use config::InferenceConfig;
pub use mock::MockBackend;
pub use ollama::OllamaBackend;
