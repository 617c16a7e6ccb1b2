//! Default constants shared across the quadra crates.
//!
//! Every tunable the engine relies on lives here so that the weight
//! calculator, decision maker, namer, and inference backends agree on one
//! set of values. Config structs default from these constants and may
//! override them.

// ─── Inference ─────────────────────────────────────────────────────────────

/// Default Ollama endpoint.
pub const OLLAMA_URL: &str = "http://localhost:11434";

/// Default generation model for classification.
pub const GEN_MODEL: &str = "llama3.2:3b";

/// Timeout for domain-specific classification calls (seconds).
pub const GEN_TIMEOUT_SECS: u64 = 45;

/// Timeout for general interpretation calls (seconds).
pub const INTERPRET_TIMEOUT_SECS: u64 = 30;

/// Maximum note excerpt length sent to the LLM (characters).
pub const EXCERPT_MAX_CHARS: usize = 4000;

/// Confidence assumed for an LLM verdict that reports none of its own.
pub const LLM_DEFAULT_CONFIDENCE: f32 = 0.8;

// ─── Semantic search ───────────────────────────────────────────────────────

/// Number of nearest neighbors requested per classification.
pub const NEIGHBOR_COUNT: usize = 5;

/// Tag→folder dominance above which the coherence factor fires its
/// critical boost.
pub const TAG_DOMINANCE_THRESHOLD: f32 = 0.7;

// ─── Dynamic weights ───────────────────────────────────────────────────────

/// Base weight for the semantic (nearest-neighbor) side.
pub const BASE_SEMANTIC_WEIGHT: f32 = 0.6;

/// Base weight for the LLM side.
pub const BASE_LLM_WEIGHT: f32 = 0.4;

/// Lower clamp for either weight component.
pub const WEIGHT_FLOOR: f32 = 0.1;

/// Upper clamp for either weight component.
pub const WEIGHT_CEIL: f32 = 0.9;

/// Corpus sizes below this count shift weight strongly toward the LLM.
pub const SMALL_CORPUS: usize = 5;

/// Corpus sizes above this count shift weight toward semantic search.
pub const LARGE_CORPUS: usize = 200;

// ─── Decisions ─────────────────────────────────────────────────────────────

/// Confidence bonus applied when both classifiers agree.
pub const CONSENSUS_BONUS: f32 = 0.15;

/// Hard cap on consensus confidence.
pub const CONSENSUS_CONFIDENCE_CAP: f32 = 0.98;

/// Hard cap on discrepancy-resolution confidence.
pub const DISCREPANCY_CONFIDENCE_CAP: f32 = 0.85;

/// Fraction of the losing side's score blended into a discrepancy win.
pub const LOSER_BLEND: f32 = 0.3;

/// Confidence assigned to an archive-preservation decision.
pub const ARCHIVE_PRESERVATION_CONFIDENCE: f32 = 0.95;

// ─── Folder naming ─────────────────────────────────────────────────────────

/// Maximum length of a generated folder name (characters).
pub const MAX_FOLDER_NAME_LEN: usize = 40;

/// Maximum length of a single intelligent-name component.
pub const MAX_NAME_COMPONENT_LEN: usize = 15;

/// Maximum number of components joined into an intelligent name.
pub const MAX_NAME_COMPONENTS: usize = 3;

/// Title used when no usable title can be extracted from a note.
pub const FALLBACK_TITLE: &str = "Sin Título";
