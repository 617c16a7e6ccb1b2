//! # quadra-semantic
//!
//! Semantic side of the hybrid classifier: turns nearest-neighbor results
//! from the external vector index into a single category verdict, and keeps
//! the historical tag→folder statistics the weight calculator consults.

pub mod coherence;
pub mod suggester;

pub use coherence::TagFolderStats;
pub use suggester::{suggest, SemanticSuggester};
