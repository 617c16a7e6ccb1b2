//! LLM classifier adapter: prompt construction, timeout enforcement,
//! permissive parsing, and category normalization.

use std::sync::Arc;

use tracing::{debug, warn};

use quadra_core::{defaults, Category, GenerationBackend, Unavailable, Verdict};

use crate::json::extract_object;
use crate::prompts::{user_prompt, CLASSIFICATION_SYSTEM_PROMPT, REFACTOR_SYSTEM_PROMPT};

/// Which system prompt to classify under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptKind {
    /// New note from the inbox.
    #[default]
    Inbox,
    /// Re-evaluation of an already-archived note.
    ArchiveRefactor,
}

/// Wraps a [`GenerationBackend`] as a classifier adapter producing
/// normalized [`Verdict`]s.
pub struct LlmClassifier {
    backend: Arc<dyn GenerationBackend>,
    timeout_secs: u64,
    prompt_kind: PromptKind,
}

impl LlmClassifier {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            timeout_secs: defaults::GEN_TIMEOUT_SECS,
            prompt_kind: PromptKind::Inbox,
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_prompt_kind(mut self, kind: PromptKind) -> Self {
        self.prompt_kind = kind;
        self
    }

    /// Classify a note. The excerpt is capped at
    /// [`defaults::EXCERPT_MAX_CHARS`] characters; the call runs under an
    /// enforced wall-clock timeout; parse failures and timeouts are
    /// [`Unavailable`], never a crash.
    pub async fn classify(
        &self,
        note_text: &str,
        directive: &str,
    ) -> Result<Verdict, Unavailable> {
        let excerpt = truncate_chars(note_text, defaults::EXCERPT_MAX_CHARS);
        let system = match self.prompt_kind {
            PromptKind::Inbox => CLASSIFICATION_SYSTEM_PROMPT,
            PromptKind::ArchiveRefactor => REFACTOR_SYSTEM_PROMPT,
        };
        let user = user_prompt(&excerpt, directive);

        let call = self.backend.complete(system, &user, self.timeout_secs);
        let response = match tokio::time::timeout(
            std::time::Duration::from_secs(self.timeout_secs),
            call,
        )
        .await
        {
            Err(_) => {
                warn!(timeout_secs = self.timeout_secs, "LLM call timed out");
                return Err(Unavailable::Timeout(self.timeout_secs));
            }
            Ok(Err(e)) => {
                warn!(error = %e, "LLM backend failed");
                return Err(Unavailable::Backend(e.to_string()));
            }
            Ok(Ok(text)) => text,
        };

        parse_verdict(&response)
    }
}

/// Parse a raw model response into a normalized verdict.
pub fn parse_verdict(response: &str) -> Result<Verdict, Unavailable> {
    let Some(object) = extract_object(response) else {
        return Err(Unavailable::MalformedResponse(
            "no JSON object in response".to_string(),
        ));
    };

    let raw_category = object
        .get("category")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");
    let category = Category::normalize(raw_category);

    let confidence = object
        .get("confidence")
        .and_then(|v| v.as_f64())
        .map(|c| c as f32)
        .unwrap_or(defaults::LLM_DEFAULT_CONFIDENCE);

    let reasoning = object
        .get("reasoning")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("LLM classified as {}", raw_category));

    let reasoning = if category.to_string().eq_ignore_ascii_case(raw_category) {
        reasoning
    } else {
        format!("Mapped '{}' to {}. {}", raw_category, category, reasoning)
    };

    let mut verdict = Verdict::new(category, confidence, reasoning);
    if let Some(folder) = object.get("folder_name").and_then(|v| v.as_str()) {
        if !folder.trim().is_empty() {
            verdict = verdict.with_folder(folder.trim());
        }
    }

    debug!(category = %verdict.category, confidence = verdict.confidence, "LLM verdict");
    Ok(verdict)
}

/// Truncate at a char boundary without splitting a code point.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
