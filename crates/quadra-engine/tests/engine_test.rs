//! End-to-end pipeline tests with canned adapters: the three reference
//! scenarios plus batch degradation and record shape.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use quadra_core::{
    Category, DecisionMethod, Error, Neighbor, NoteContext, Result, VectorSearch,
};
use quadra_engine::{ClassificationPipeline, MemoryVault, PipelineConfig};
use quadra_inference::{LlmClassifier, MockBackend};
use quadra_semantic::SemanticSuggester;

/// Canned vector index for tests.
struct StaticIndex {
    neighbors: Vec<Neighbor>,
    corpus: usize,
    fail: bool,
}

impl StaticIndex {
    fn with(neighbors: &[(&str, f32)], corpus: usize) -> Self {
        Self {
            neighbors: neighbors.iter().map(|(c, d)| Neighbor::new(*c, *d)).collect(),
            corpus,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            neighbors: vec![],
            corpus: 0,
            fail: true,
        }
    }
}

#[async_trait]
impl VectorSearch for StaticIndex {
    async fn search_neighbors(&self, _text: &str, _k: usize) -> Result<Vec<Neighbor>> {
        if self.fail {
            return Err(Error::Search("index offline".into()));
        }
        Ok(self.neighbors.clone())
    }

    async fn corpus_size(&self) -> Result<usize> {
        Ok(self.corpus)
    }
}

fn pipeline(
    index: StaticIndex,
    backend: MockBackend,
    vault: MemoryVault,
) -> ClassificationPipeline {
    ClassificationPipeline::new(
        SemanticSuggester::new(Arc::new(index)),
        LlmClassifier::new(Arc::new(backend)),
        Arc::new(vault),
    )
    .with_config(PipelineConfig::default())
}

fn inbox_note(text: &str, name: &str) -> NoteContext {
    NoteContext::new(text, format!("/vault/00-Inbox/{}", name), "/vault")
        .with_last_modified(Utc::now() - Duration::days(2))
}

#[tokio::test]
async fn test_scenario_a_consensus_keeps_llm_folder() {
    let index = StaticIndex::with(
        &[("Areas", 0.4), ("Areas", 0.5), ("Resources", 0.9)],
        120,
    );
    let backend = MockBackend::new()
        .with_response(r#"{"category": "Areas", "folder_name": "Team Sync"}"#);
    let pipeline = pipeline(index, backend, MemoryVault::new());

    let note = inbox_note(
        "Meeting notes about ongoing team sync, weekly cadence, no deadline",
        "sync.md",
    );
    let outcome = pipeline.classify(&note).await.unwrap();

    assert_eq!(outcome.decision.category, Category::Areas);
    assert_eq!(outcome.decision.method, DecisionMethod::Consensus);
    assert_eq!(outcome.decision.folder_name, "Team Sync");
    assert!(outcome.decision.confidence <= 0.98);
    assert!(!outcome.decision.reasoning.is_empty());
}

#[tokio::test]
async fn test_scenario_b_urgency_reweights_toward_semantic_side() {
    // Neighbors vote Resources, the LLM votes Projects. The urgent deadline
    // note pushes the semantic weight to its ceiling, the semantic side
    // wins the score comparison, and the critical urgency signal corrects
    // its category to Projects.
    let index = StaticIndex::with(
        &[("reference", 0.6), ("tutorial", 0.7), ("Resources", 0.65)],
        120,
    );
    let backend = MockBackend::new()
        .with_response(r#"{"category": "Projects", "folder_name": "OAuth Fix"}"#);
    let pipeline = pipeline(index, backend, MemoryVault::new());

    let note = inbox_note("URGENT: ship OAuth fix by Friday deadline", "oauth.md");
    let outcome = pipeline.classify(&note).await.unwrap();

    assert_eq!(outcome.decision.method, DecisionMethod::ChromadbWeighted);
    assert_eq!(outcome.decision.category, Category::Projects);
    assert!(outcome.record.weights.semantic > 0.85);
    assert!(outcome
        .record
        .factors_applied
        .iter()
        .any(|f| f.contains("urgency")));
}

#[tokio::test]
async fn test_scenario_c_archive_preservation() {
    let index = StaticIndex::with(&[("Projects", 0.2)], 120);
    let backend = MockBackend::new()
        .with_response(r#"{"category": "Projects", "folder_name": "Revived"}"#);
    let pipeline = pipeline(index, backend, MemoryVault::new());

    let note = NoteContext::new(
        "Trabajo completado hace mucho tiempo.",
        "/vault/04-Archive/Proyectos Viejos/nota.md",
        "/vault",
    )
    .with_last_modified(Utc::now() - Duration::days(400));

    let outcome = pipeline.classify(&note).await.unwrap();

    assert_eq!(outcome.decision.method, DecisionMethod::ArchivePreservation);
    assert_eq!(outcome.decision.category, Category::Archive);
    assert_eq!(outcome.decision.folder_name, "Proyectos Viejos");
    assert!((outcome.decision.confidence - 0.95).abs() < 1e-6);
}

#[tokio::test]
async fn test_llm_failure_degrades_to_semantic_only() {
    let index = StaticIndex::with(&[("Areas", 0.2), ("Areas", 0.3)], 120);
    let backend = MockBackend::new().fail_with("connection refused");
    let pipeline = pipeline(index, backend, MemoryVault::new());

    let note = inbox_note("Notes on recurring housekeeping routines for the quarter", "n.md");
    let outcome = pipeline.classify(&note).await.unwrap();

    assert_eq!(outcome.decision.method, DecisionMethod::ChromadbOnly);
    assert_eq!(outcome.decision.llm_score, 0.0);
    assert!(!outcome.decision.folder_name.is_empty());
}

#[tokio::test]
async fn test_semantic_failure_degrades_to_llm_only() {
    let index = StaticIndex::failing();
    let backend = MockBackend::new()
        .with_response(r#"{"category": "Resources", "folder_name": "Docker Guides"}"#);
    let pipeline = pipeline(index, backend, MemoryVault::new());

    let note = inbox_note("Docker networking reference notes", "docker.md");
    let outcome = pipeline.classify(&note).await.unwrap();

    assert_eq!(outcome.decision.method, DecisionMethod::LlmOnly);
    assert_eq!(outcome.decision.category, Category::Resources);
    assert_eq!(outcome.decision.folder_name, "Docker Guides");
}

#[tokio::test]
async fn test_batch_skips_failed_notes_and_continues() {
    // Empty index + failing LLM: every note individually unclassifiable,
    // but the batch still visits all of them.
    let index = StaticIndex::with(&[], 0);
    let backend = MockBackend::new().fail_with("model not found");
    let pipeline = pipeline(index, backend, MemoryVault::new());

    let notes = vec![
        inbox_note("first note", "a.md"),
        inbox_note("second note", "b.md"),
        inbox_note("third note", "c.md"),
    ];
    let results = pipeline.classify_batch(&notes).await;

    assert_eq!(results.len(), 3);
    for (path, outcome) in &results {
        assert!(outcome.is_err(), "{} should have failed", path.display());
    }
}

#[tokio::test]
async fn test_consensus_folder_consolidates_into_existing_variant() {
    let mut vault = MemoryVault::new();
    vault.add_folder("02-Areas", "Team Sync_2");
    vault.add_note("02-Areas", "Team Sync_2", "old.md", "sync notes");

    let index = StaticIndex::with(&[("Areas", 0.3), ("Areas", 0.4)], 120);
    let backend = MockBackend::new()
        .with_response(r#"{"category": "Areas", "folder_name": "Team Sync"}"#);
    let pipeline = pipeline(index, backend, vault);

    let note = inbox_note("More notes about the team sync", "sync2.md");
    let outcome = pipeline.classify(&note).await.unwrap();

    // Never a fresh sibling of an existing variant: the suffixed folder
    // already in the vault is reused.
    assert_eq!(outcome.decision.folder_name, "Team Sync_2");
}

#[tokio::test]
async fn test_temporal_proximity_boosts_confidence() {
    let mut vault = MemoryVault::new();
    vault.add_folder("02-Areas", "Team Sync");
    vault.add_note("02-Areas", "Team Sync", "old.md", "sync notes");
    vault.set_modified(
        "02-Areas",
        "Team Sync",
        "old.md",
        Utc::now() - Duration::days(5),
    );

    let index = StaticIndex::with(&[("Areas", 0.3), ("Areas", 0.4)], 120);
    let backend = MockBackend::new()
        .with_response(r#"{"category": "Areas", "folder_name": "Team Sync"}"#);
    let pipeline = pipeline(index, backend, vault);

    let note = inbox_note("More notes about the recurring team meeting", "sync3.md");
    let outcome = pipeline.classify(&note).await.unwrap();

    assert_eq!(outcome.decision.temporal_score, Some(1.0));
}

#[tokio::test]
async fn test_record_carries_stable_fields_and_inputs() {
    let index = StaticIndex::with(&[("Areas", 0.3), ("Areas", 0.5)], 120);
    let backend = MockBackend::new()
        .with_response(r#"{"category": "Areas", "folder_name": "Team Sync"}"#);
    let pipeline = pipeline(index, backend, MemoryVault::new());

    let note = inbox_note("Team sync cadence notes", "sync.md");
    let outcome = pipeline.classify(&note).await.unwrap();

    let json = serde_json::to_value(&outcome.record).unwrap();
    for field in [
        "category",
        "folder_name",
        "confidence",
        "method",
        "reasoning",
        "semantic_score",
        "llm_score",
        "note_path",
        "weights",
        "analysis",
    ] {
        assert!(json.get(field).is_some(), "missing record field {}", field);
    }
    assert!(outcome.record.semantic_verdict.is_some());
    assert!(outcome.record.llm_verdict.is_some());
    let weights = &outcome.record.weights;
    assert!((weights.semantic + weights.llm - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_empty_note_still_classifies() {
    let index = StaticIndex::with(&[("Resources", 0.5)], 120);
    let backend = MockBackend::new();
    let pipeline = pipeline(index, backend, MemoryVault::new());

    let note = inbox_note("", "empty.md");
    let outcome = pipeline.classify(&note).await.unwrap();
    assert!((0.0..=1.0).contains(&outcome.decision.confidence));
    assert!(!outcome.decision.folder_name.is_empty());
}

#[tokio::test]
async fn test_classification_is_idempotent_across_runs() {
    let note = inbox_note("Docker deployment research for the platform migration", "d.md");

    let mut decisions = Vec::new();
    for _ in 0..2 {
        let index = StaticIndex::with(&[("Resources", 0.3), ("Resources", 0.4)], 120);
        let backend = MockBackend::new()
            .with_response(r#"{"category": "Resources", "folder_name": "Docker Research"}"#);
        let pipeline = pipeline(index, backend, MemoryVault::new());
        decisions.push(pipeline.classify(&note).await.unwrap().decision);
    }

    assert_eq!(decisions[0].category, decisions[1].category);
    assert_eq!(decisions[0].folder_name, decisions[1].folder_name);
    assert_eq!(decisions[0].method, decisions[1].method);
}
