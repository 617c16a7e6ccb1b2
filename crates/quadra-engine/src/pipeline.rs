//! The per-note classification pipeline and the sequential batch loop.
//!
//! Stages for one note: content analysis → both classifier adapters issued
//! concurrently and joined → dynamic weights → hybrid decision → folder
//! naming → consolidation redirect. The engine emits decisions and audit
//! records; every filesystem mutation belongs to the external vault-mutation
//! collaborator.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use chrono::Utc;
use once_cell::sync::Lazy;
use tracing::{debug, info, warn};

use quadra_core::{
    ClassificationRecord, ContentAnalysis, Decision, DecisionMethod, NoteContext, Result,
    VaultFolders, VectorSearch,
};
use quadra_inference::LlmClassifier;
use quadra_semantic::{SemanticSuggester, TagFolderStats};

use crate::archive::ArchivePolicy;
use crate::decision::{decide, DecisionInputs};
use crate::duplicates::detect_duplicate_suffix;
use crate::naming::{resolve_unique, FolderNamer, NamingStrategy};
use crate::weights::{calculate_weights, FactorInput};

/// Pipeline tunables.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub naming_strategy: NamingStrategy,
    pub archive_policy: ArchivePolicy,
}

/// Decision plus its flat audit record.
#[derive(Debug, Clone)]
pub struct ClassificationOutcome {
    pub decision: Decision,
    pub record: ClassificationRecord,
}

/// Wires the classification stages together for one vault.
pub struct ClassificationPipeline {
    suggester: SemanticSuggester,
    classifier: LlmClassifier,
    vault: Arc<dyn VaultFolders>,
    tag_stats: TagFolderStats,
    namer: FolderNamer,
    config: PipelineConfig,
}

impl ClassificationPipeline {
    pub fn new(
        suggester: SemanticSuggester,
        classifier: LlmClassifier,
        vault: Arc<dyn VaultFolders>,
    ) -> Self {
        let config = PipelineConfig::default();
        Self {
            suggester,
            classifier,
            vault,
            tag_stats: TagFolderStats::new(),
            namer: FolderNamer::new(config.naming_strategy),
            config,
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.namer = FolderNamer::new(config.naming_strategy);
        self.config = config;
        self
    }

    /// Supply historical tag→folder statistics for the coherence factor.
    pub fn with_tag_stats(mut self, stats: TagFolderStats) -> Self {
        self.tag_stats = stats;
        self
    }

    /// Classify one note end to end.
    pub async fn classify(&self, ctx: &NoteContext) -> Result<ClassificationOutcome> {
        let start = Instant::now();
        let analysis = ContentAnalysis::analyze(ctx, Utc::now());

        // Both adapters run concurrently; neither the weights nor the
        // decision proceed until both have returned or timed out.
        let (semantic, llm) = tokio::join!(
            self.suggester.suggest(&ctx.text),
            self.classifier.classify(&ctx.text, &ctx.user_directive)
        );

        let corpus_size = self.suggester.corpus_size().await;
        let duplicate = detect_duplicate_suffix(&ctx.file_stem());

        let report = calculate_weights(&FactorInput {
            semantic_confidence: semantic.as_ref().map(|v| v.confidence).unwrap_or(0.0),
            analysis: &analysis,
            corpus_size,
            tag_dominance: self.tag_stats.max_dominance(&analysis.tags),
            is_duplicate_filename: duplicate.is_duplicate,
        });

        let semantic_verdict = semantic.clone().ok();
        let llm_verdict = llm.clone().ok();

        let mut decision = decide(DecisionInputs {
            ctx,
            analysis: &analysis,
            semantic,
            llm,
            weights: report.weights,
            archive_policy: &self.config.archive_policy,
        })?;

        self.finish_folder_name(ctx, &mut decision);

        info!(
            note_path = %ctx.relative_path().display(),
            category = %decision.category,
            folder = %decision.folder_name,
            confidence = decision.confidence,
            method = %decision.method,
            duration_ms = start.elapsed().as_millis() as u64,
            "note classified"
        );

        let record = ClassificationRecord::new(
            ctx.relative_path().display().to_string(),
            decision.clone(),
            semantic_verdict,
            llm_verdict,
            report.weights,
            report.factors_applied,
            analysis,
        );

        Ok(ClassificationOutcome { decision, record })
    }

    /// Classify many notes sequentially. A failing note is logged and
    /// skipped; it never halts the rest of the batch.
    pub async fn classify_batch(
        &self,
        notes: &[NoteContext],
    ) -> Vec<(PathBuf, Result<ClassificationOutcome>)> {
        let mut results = Vec::with_capacity(notes.len());
        for ctx in notes {
            let outcome = self.classify(ctx).await;
            if let Err(e) = &outcome {
                warn!(
                    note_path = %ctx.relative_path().display(),
                    error = %e,
                    "skipping unclassifiable note"
                );
            }
            results.push((ctx.path.clone(), outcome));
        }
        info!(note_count = notes.len(), "batch classification finished");
        results
    }

    /// Fill or consolidate the decision's folder name, then apply the
    /// temporal-proximity boost against the destination folder.
    fn finish_folder_name(&self, ctx: &NoteContext, decision: &mut Decision) {
        if decision.method != DecisionMethod::ArchivePreservation {
            let category_folder = decision.category.vault_folder();
            decision.folder_name = if decision.folder_name.is_empty() {
                self.namer
                    .name(&ctx.text, decision.category, self.vault.as_ref())
            } else {
                // Classifier-suggested names still consolidate into
                // existing folders instead of minting variants.
                resolve_unique(&decision.folder_name, category_folder, self.vault.as_ref())
            };

            if let Some(score) = self.temporal_proximity(ctx, decision) {
                decision.temporal_score = Some(score);
                decision.confidence = (decision.confidence + score * 0.3)
                    .min(quadra_core::defaults::CONSENSUS_CONFIDENCE_CAP);
                debug!(
                    folder = %decision.folder_name,
                    temporal_score = score,
                    "temporal proximity applied"
                );
            }
        }
    }

    /// Average temporal closeness between the note and the notes already in
    /// its destination folder: 1.0 within 30 days, 0.5 within 90, 0.1
    /// beyond.
    fn temporal_proximity(&self, ctx: &NoteContext, decision: &Decision) -> Option<f32> {
        let note_ts = ctx.last_modified?;
        let category_folder = decision.category.vault_folder();
        let notes = self
            .vault
            .list_notes(category_folder, &decision.folder_name);
        if notes.is_empty() {
            return None;
        }

        let mut scores = Vec::new();
        for name in &notes {
            if let Some(ts) = self
                .vault
                .note_modified(category_folder, &decision.folder_name, name)
            {
                let days = (note_ts - ts).num_days().abs();
                scores.push(match days {
                    d if d <= 30 => 1.0f32,
                    d if d <= 90 => 0.5,
                    _ => 0.1,
                });
            }
        }
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f32>() / scores.len() as f32)
    }
}

/// Memoized vector-index handles, one per vault path.
///
/// Opening the external index is expensive; batch runs reuse a single
/// handle per vault instead of re-initializing per note.
pub struct SharedIndex;

static SHARED_INDEXES: Lazy<Mutex<HashMap<PathBuf, Arc<dyn VectorSearch>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

impl SharedIndex {
    /// Return the handle for `vault_path`, creating it with `factory` on
    /// first use.
    pub fn get_or_init<F>(vault_path: &Path, factory: F) -> Arc<dyn VectorSearch>
    where
        F: FnOnce() -> Arc<dyn VectorSearch>,
    {
        let mut indexes = SHARED_INDEXES.lock().expect("shared index lock");
        indexes
            .entry(vault_path.to_path_buf())
            .or_insert_with(factory)
            .clone()
    }

    /// Drop all memoized handles (tests and explicit reconnects).
    pub fn reset() {
        SHARED_INDEXES.lock().expect("shared index lock").clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quadra_core::Neighbor;

    struct CountingIndex;

    #[async_trait]
    impl VectorSearch for CountingIndex {
        async fn search_neighbors(&self, _text: &str, _k: usize) -> Result<Vec<Neighbor>> {
            Ok(vec![])
        }
        async fn corpus_size(&self) -> Result<usize> {
            Ok(0)
        }
    }

    #[test]
    fn test_shared_index_memoizes_per_path() {
        SharedIndex::reset();
        let mut created = 0;
        let path = PathBuf::from("/vault-a");
        for _ in 0..3 {
            let _ = SharedIndex::get_or_init(&path, || {
                created += 1;
                Arc::new(CountingIndex)
            });
        }
        assert_eq!(created, 1);

        let other = PathBuf::from("/vault-b");
        let _ = SharedIndex::get_or_init(&other, || {
            created += 1;
            Arc::new(CountingIndex)
        });
        assert_eq!(created, 2);
        SharedIndex::reset();
    }
}
