//! Core data types flowing through the classification pipeline.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::ContentAnalysis;
use crate::category::Category;
use crate::defaults;

/// Immutable per-classification input. Created once per note at
/// classification start; read-only afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteContext {
    /// Raw note text.
    pub text: String,
    /// Path of the note file.
    pub path: PathBuf,
    /// Vault root the note lives under.
    pub vault_root: PathBuf,
    /// Last modification time, if the filesystem provided one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// File size in bytes.
    pub file_size: u64,
    /// Free-text user directive passed along to the LLM classifier.
    pub user_directive: String,
}

impl NoteContext {
    pub fn new(text: impl Into<String>, path: impl Into<PathBuf>, vault_root: impl Into<PathBuf>) -> Self {
        let text = text.into();
        Self {
            file_size: text.len() as u64,
            text,
            path: path.into(),
            vault_root: vault_root.into(),
            last_modified: None,
            user_directive: String::new(),
        }
    }

    pub fn with_last_modified(mut self, ts: DateTime<Utc>) -> Self {
        self.last_modified = Some(ts);
        self
    }

    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.user_directive = directive.into();
        self
    }

    pub fn with_file_size(mut self, size: u64) -> Self {
        self.file_size = size;
        self
    }

    /// Note path relative to the vault root, as far as it can be resolved.
    pub fn relative_path(&self) -> PathBuf {
        self.path
            .strip_prefix(&self.vault_root)
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|_| self.path.clone())
    }

    /// True if the note currently resides under the Archive folder.
    pub fn is_in_archive(&self) -> bool {
        self.relative_path().components().any(|part| {
            let part = part.as_os_str().to_string_lossy().to_lowercase();
            part.starts_with("04-archive") || part == "archive"
        })
    }

    /// Name of the folder the note currently sits in, if it has one below
    /// the category level.
    pub fn current_folder(&self) -> Option<String> {
        let relative = self.relative_path();
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();
        if parts.len() >= 2 {
            Some(parts[parts.len() - 2].clone())
        } else {
            None
        }
    }

    /// File name without the `.md` extension.
    pub fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// One classifier's opinion about a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Canonical category after normalization.
    pub category: Category,
    /// Confidence in [0, 1].
    pub confidence: f32,
    /// Human-readable justification.
    pub reasoning: String,
    /// Folder name suggested by the classifier, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
}

impl Verdict {
    pub fn new(category: Category, confidence: f32, reasoning: impl Into<String>) -> Self {
        Self {
            category,
            confidence: confidence.clamp(0.0, 1.0),
            reasoning: reasoning.into(),
            folder_name: None,
        }
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder_name = Some(folder.into());
        self
    }

    /// A usable folder suggestion: present, non-empty, and not a
    /// placeholder like "Unknown".
    pub fn usable_folder(&self) -> Option<&str> {
        match self.folder_name.as_deref() {
            Some(name) if !name.trim().is_empty() && !name.eq_ignore_ascii_case("unknown") => {
                Some(name)
            }
            _ => None,
        }
    }
}

/// Semantic/LLM weight pair, always summing to 1.0 with each component
/// clamped to [0.1, 0.9].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    /// Weight for the semantic (nearest-neighbor) side.
    pub semantic: f32,
    /// Weight for the LLM side.
    pub llm: f32,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            semantic: defaults::BASE_SEMANTIC_WEIGHT,
            llm: defaults::BASE_LLM_WEIGHT,
        }
    }
}

impl WeightVector {
    /// Normalize a pair of raw (possibly negative) weight totals into a
    /// valid vector: divide by the sum, then clamp each side to
    /// [0.1, 0.9]. Clamping a complementary pair preserves the unit sum.
    pub fn from_raw(semantic: f32, llm: f32) -> Self {
        let total = semantic + llm;
        let (semantic, llm) = if total.abs() < f32::EPSILON {
            (defaults::BASE_SEMANTIC_WEIGHT, defaults::BASE_LLM_WEIGHT)
        } else {
            (semantic / total, llm / total)
        };
        Self {
            semantic: semantic.clamp(defaults::WEIGHT_FLOOR, defaults::WEIGHT_CEIL),
            llm: llm.clamp(defaults::WEIGHT_FLOOR, defaults::WEIGHT_CEIL),
        }
    }
}

/// How the final decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionMethod {
    /// Both classifiers agreed on the category.
    Consensus,
    /// Classifiers disagreed; the semantic side won the weighted vote.
    ChromadbWeighted,
    /// Classifiers disagreed; the LLM side won the weighted vote.
    LlmWeighted,
    /// LLM unavailable; decided from the semantic verdict alone.
    ChromadbOnly,
    /// Semantic search unavailable; decided from the LLM verdict alone.
    LlmOnly,
    /// Note already archived and judged to stay archived.
    ArchivePreservation,
}

impl std::fmt::Display for DecisionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Consensus => write!(f, "consensus"),
            Self::ChromadbWeighted => write!(f, "chromadb_weighted"),
            Self::LlmWeighted => write!(f, "llm_weighted"),
            Self::ChromadbOnly => write!(f, "chromadb_only"),
            Self::LlmOnly => write!(f, "llm_only"),
            Self::ArchivePreservation => write!(f, "archive_preservation"),
        }
    }
}

/// Final classification output for one note.
///
/// Constructed once by the decision maker; the folder namer overwrites
/// `folder_name` and the consolidation resolver may redirect it to an
/// existing folder. Never mutated after being returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub category: Category,
    pub folder_name: String,
    pub confidence: f32,
    pub method: DecisionMethod,
    pub reasoning: String,
    /// Raw confidence of the semantic verdict (0.0 when unavailable).
    pub semantic_score: f32,
    /// Raw confidence of the LLM verdict (0.0 when unavailable).
    pub llm_score: f32,
    /// Temporal proximity of the note to its destination folder, when
    /// computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal_score: Option<f32>,
}

/// Flat audit record for one classification, consumed by the external
/// learning/feedback collaborator. Field names are stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub note_path: String,
    #[serde(flatten)]
    pub decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_verdict: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_verdict: Option<Verdict>,
    pub weights: WeightVector,
    /// Explanations from every weight factor that fired.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub factors_applied: Vec<String>,
    pub analysis: ContentAnalysis,
}

impl ClassificationRecord {
    pub fn new(
        note_path: impl Into<String>,
        decision: Decision,
        semantic_verdict: Option<Verdict>,
        llm_verdict: Option<Verdict>,
        weights: WeightVector,
        factors_applied: Vec<String>,
        analysis: ContentAnalysis,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            note_path: note_path.into(),
            decision,
            semantic_verdict,
            llm_verdict,
            weights,
            factors_applied,
            analysis,
        }
    }
}
