//! # quadra-engine
//!
//! The hybrid classification decision engine: per-note dynamic weighting of
//! the two classifier opinions, consensus/discrepancy resolution, archive
//! preservation, folder naming, duplicate consolidation, and the pipeline
//! that wires the stages together.

pub mod archive;
pub mod decision;
pub mod duplicates;
pub mod naming;
pub mod pipeline;
pub mod vault;
pub mod weights;

pub use archive::ArchivePolicy;
pub use decision::{decide, DecisionInputs};
pub use duplicates::{
    detect_duplicate_suffix, ConsolidationPlan, DuplicateMatch, DuplicateResolver, FileMove,
    MergeDecision,
};
pub use naming::{FolderNamer, NamingStrategy};
pub use pipeline::{ClassificationOutcome, ClassificationPipeline, PipelineConfig, SharedIndex};
pub use vault::{FsVault, MemoryVault};
pub use weights::{calculate_weights, FactorInput, WeightReport};
