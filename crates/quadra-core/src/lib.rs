//! # quadra-core
//!
//! Core types, traits, and content analysis for the quadra classification
//! engine.
//!
//! This crate provides the foundational data structures, the category model,
//! and the deterministic content analyzer that the other quadra crates
//! depend on.

pub mod analysis;
pub mod category;
pub mod defaults;
pub mod error;
pub mod heuristics;
pub mod logging;
pub mod models;
pub mod tags;
pub mod temporal;
pub mod traits;

// Re-export commonly used types at crate root
pub use analysis::ContentAnalysis;
pub use category::{Category, INBOX_FOLDER};
pub use error::{Error, Result, Unavailable};
pub use heuristics::{
    CompletionStatus, ContentType, EmotionalTone, HeuristicScores, KnowledgeDepth, TemporalContext,
};
pub use models::{
    ClassificationRecord, Decision, DecisionMethod, NoteContext, Verdict, WeightVector,
};
pub use tags::{clean_tags, extract_tags};
pub use temporal::RecencyBucket;
pub use traits::{GenerationBackend, Neighbor, VaultFolders, VectorSearch};
