//! Structured logging schema and field name constants for quadra.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, batch completions |
//! | DEBUG | Decision points, factor applications, weight values |
//! | TRACE | Per-neighbor / per-keyword iteration |

use tracing_subscriber::EnvFilter;

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "analysis", "semantic", "inference", "engine"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "weights", "decision", "namer", "ollama"
pub const COMPONENT: &str = "component";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Path of the note being classified, relative to the vault root.
pub const NOTE_PATH: &str = "note_path";

/// Vault root directory.
pub const VAULT: &str = "vault";

// ─── Classification fields ─────────────────────────────────────────────────

/// Canonical category of a verdict or decision.
pub const CATEGORY: &str = "category";

/// Destination folder name.
pub const FOLDER: &str = "folder";

/// Confidence of a verdict or decision.
pub const CONFIDENCE: &str = "confidence";

/// Decision method tag.
pub const METHOD: &str = "method";

/// Weight assigned to the semantic side.
pub const SEMANTIC_WEIGHT: &str = "semantic_weight";

/// Weight assigned to the LLM side.
pub const LLM_WEIGHT: &str = "llm_weight";

/// Number of neighbors returned by the vector index.
pub const NEIGHBOR_COUNT: &str = "neighbor_count";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Model name used for inference.
pub const MODEL: &str = "model";

/// Error message when an operation degrades.
pub const ERROR_MSG: &str = "error";

/// Initialize a tracing subscriber from an env-filter directive string,
/// falling back to `RUST_LOG` and then the given default.
///
/// Intended for binaries and integration tests; library code only emits
/// events and never installs subscribers.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_are_snake_case() {
        for field in [
            SUBSYSTEM,
            COMPONENT,
            NOTE_PATH,
            CATEGORY,
            FOLDER,
            CONFIDENCE,
            METHOD,
            SEMANTIC_WEIGHT,
            LLM_WEIGHT,
            NEIGHBOR_COUNT,
            DURATION_MS,
        ] {
            assert!(field
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }

    #[test]
    fn test_init_is_idempotent() {
        init("debug");
        init("info");
    }
}
