//! Hybrid decision making: consensus, discrepancy resolution, archive
//! preservation, and the single-classifier fallback chain.

use quadra_core::{
    defaults, Category, ContentAnalysis, Decision, DecisionMethod, Error, NoteContext, Result,
    TemporalContext, Unavailable, Verdict, WeightVector,
};
use tracing::{debug, info, warn};

use crate::archive::ArchivePolicy;

/// Everything the decision maker consumes for one note.
pub struct DecisionInputs<'a> {
    pub ctx: &'a NoteContext,
    pub analysis: &'a ContentAnalysis,
    pub semantic: Result<Verdict, Unavailable>,
    pub llm: Result<Verdict, Unavailable>,
    pub weights: WeightVector,
    pub archive_policy: &'a ArchivePolicy,
}

impl<'a> std::fmt::Debug for DecisionInputs<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionInputs")
            .field("path", &self.ctx.path)
            .field("semantic", &self.semantic)
            .field("llm", &self.llm)
            .field("weights", &self.weights)
            .finish()
    }
}

/// Resolve both verdicts into a final [`Decision`].
///
/// The fallback chain, in order: archive preservation pre-empts both
/// classifiers; consensus; weighted discrepancy resolution; single-side
/// fallback when one adapter is unavailable; error when both are.
///
/// The returned decision's `folder_name` may be empty — the folder namer
/// fills it downstream when no classifier supplied a usable name.
pub fn decide(inputs: DecisionInputs<'_>) -> Result<Decision> {
    if inputs.ctx.is_in_archive() {
        if let Some(signals) = inputs
            .archive_policy
            .should_stay_archived(inputs.ctx, inputs.analysis)
        {
            return Ok(archive_preservation(&inputs, signals));
        }
    }

    match (&inputs.semantic, &inputs.llm) {
        (Ok(semantic), Ok(llm)) => {
            if semantic.category == llm.category {
                Ok(consensus(&inputs, semantic, llm))
            } else {
                Ok(discrepancy(&inputs, semantic, llm))
            }
        }
        (Ok(semantic), Err(unavailable)) => {
            warn!(error = %unavailable, "LLM unavailable, deciding from semantic verdict alone");
            Ok(semantic_only(&inputs, semantic, unavailable))
        }
        (Err(unavailable), Ok(llm)) => {
            warn!(error = %unavailable, "semantic search unavailable, deciding from LLM verdict alone");
            Ok(llm_only(llm, unavailable))
        }
        (Err(semantic_err), Err(llm_err)) => Err(Error::ClassifiersUnavailable(format!(
            "semantic: {}; llm: {}",
            semantic_err, llm_err
        ))),
    }
}

fn archive_preservation(inputs: &DecisionInputs<'_>, signals: Vec<String>) -> Decision {
    let folder = inputs
        .ctx
        .current_folder()
        .unwrap_or_else(|| "Miscellaneous".to_string());
    info!(
        note_path = %inputs.ctx.relative_path().display(),
        folder = %folder,
        "preserving archived note"
    );
    Decision {
        category: Category::Archive,
        folder_name: folder,
        confidence: defaults::ARCHIVE_PRESERVATION_CONFIDENCE,
        method: DecisionMethod::ArchivePreservation,
        reasoning: format!("Already archived with no activity signals: {}", signals.join("; ")),
        semantic_score: inputs
            .semantic
            .as_ref()
            .map(|v| v.confidence)
            .unwrap_or(0.0),
        llm_score: inputs.llm.as_ref().map(|v| v.confidence).unwrap_or(0.0),
        temporal_score: None,
    }
}

fn consensus(inputs: &DecisionInputs<'_>, semantic: &Verdict, llm: &Verdict) -> Decision {
    let w = inputs.weights;
    let confidence = (semantic.confidence * w.semantic
        + llm.confidence * w.llm
        + defaults::CONSENSUS_BONUS)
        .min(defaults::CONSENSUS_CONFIDENCE_CAP);

    let mut reasoning_parts = vec![format!(
        "Both classifiers agree on {}. {}",
        semantic.category, semantic.reasoning
    )];
    if !inputs.analysis.para_tags.is_empty() {
        reasoning_parts.push(format!(
            "PARA tags confirm: {}",
            inputs.analysis.para_tags.join(", ")
        ));
    }
    if inputs.analysis.has_todos {
        reasoning_parts.push(format!("{} pending tasks", inputs.analysis.todo_count));
    }

    debug!(category = %semantic.category, confidence, "consensus decision");

    Decision {
        category: semantic.category,
        folder_name: llm.usable_folder().unwrap_or_default().to_string(),
        confidence,
        method: DecisionMethod::Consensus,
        reasoning: reasoning_parts.join("; "),
        semantic_score: semantic.confidence,
        llm_score: llm.confidence,
        temporal_score: None,
    }
}

fn discrepancy(inputs: &DecisionInputs<'_>, semantic: &Verdict, llm: &Verdict) -> Decision {
    let w = inputs.weights;
    let semantic_score = semantic.confidence * w.semantic;
    let llm_score = llm.confidence * w.llm;

    debug!(
        semantic_category = %semantic.category,
        llm_category = %llm.category,
        semantic_score,
        llm_score,
        "discrepancy resolution"
    );

    let (category, folder_name, method, mut reasoning, winner, loser) = if semantic_score > llm_score
    {
        let (category, override_note) =
            apply_critical_override(semantic.category, inputs.analysis);
        let mut reasoning = format!(
            "Semantic side prevails by weight ({:.2} vs {:.2}). {}",
            w.semantic, w.llm, semantic.reasoning
        );
        if let Some(note) = override_note {
            reasoning.push_str("; ");
            reasoning.push_str(&note);
        }
        (
            category,
            String::new(),
            DecisionMethod::ChromadbWeighted,
            reasoning,
            semantic_score,
            llm_score,
        )
    } else {
        (
            llm.category,
            llm.usable_folder().unwrap_or_default().to_string(),
            DecisionMethod::LlmWeighted,
            format!(
                "LLM side prevails by weight ({:.2} vs {:.2}). {}",
                w.llm, w.semantic, llm.reasoning
            ),
            llm_score,
            semantic_score,
        )
    };

    if !inputs.analysis.para_tags.is_empty() {
        reasoning.push_str(&format!(
            "; PARA tags present: {}",
            inputs.analysis.para_tags.join(", ")
        ));
    }

    // Disagreement leaves residual uncertainty; the loser contributes a
    // reduced share and the total stays under the discrepancy cap.
    let confidence =
        (winner + loser * defaults::LOSER_BLEND).min(defaults::DISCREPANCY_CONFIDENCE_CAP);

    Decision {
        category,
        folder_name,
        confidence,
        method,
        reasoning,
        semantic_score: semantic.confidence,
        llm_score: llm.confidence,
        temporal_score: None,
    }
}

fn semantic_only(
    inputs: &DecisionInputs<'_>,
    semantic: &Verdict,
    unavailable: &Unavailable,
) -> Decision {
    let (category, override_note) = apply_critical_override(semantic.category, inputs.analysis);
    let mut reasoning = format!("LLM unavailable ({}); {}", unavailable, semantic.reasoning);
    if let Some(note) = override_note {
        reasoning.push_str("; ");
        reasoning.push_str(&note);
    }
    Decision {
        category,
        folder_name: String::new(),
        confidence: semantic.confidence,
        method: DecisionMethod::ChromadbOnly,
        reasoning,
        semantic_score: semantic.confidence,
        llm_score: 0.0,
        temporal_score: None,
    }
}

fn llm_only(llm: &Verdict, unavailable: &Unavailable) -> Decision {
    Decision {
        category: llm.category,
        folder_name: llm.usable_folder().unwrap_or_default().to_string(),
        confidence: llm.confidence,
        method: DecisionMethod::LlmOnly,
        reasoning: format!(
            "Semantic search unavailable ({}); {}",
            unavailable, llm.reasoning
        ),
        semantic_score: 0.0,
        llm_score: llm.confidence,
        temporal_score: None,
    }
}

/// Correct the semantic side's category when a critical content signal
/// contradicts it.
///
/// The neighbor vote reflects where *similar* notes were filed, not what
/// this note's own text demands. Hard urgency with a deadline marks an
/// active project; explicit completion marks archive material; strong
/// reference structure marks a resource. These are the same adjustments the
/// semantic scoring side applies to its category vote — kept here so the
/// suggester stays a pure neighbor vote.
fn apply_critical_override(
    category: Category,
    analysis: &ContentAnalysis,
) -> (Category, Option<String>) {
    let scores = &analysis.scores;

    if scores.urgency > 0.6
        && scores.temporal_context == TemporalContext::DeadlineDriven
        && category != Category::Projects
    {
        return (
            Category::Projects,
            Some(format!(
                "urgency {:.2} with deadline framing overrides {} toward Projects",
                scores.urgency, category
            )),
        );
    }

    if scores.completion_status == quadra_core::CompletionStatus::Completed
        && scores.urgency <= 0.3
        && category != Category::Archive
    {
        return (
            Category::Archive,
            Some(format!(
                "completion markers override {} toward Archive",
                category
            )),
        );
    }

    if scores.reference_content > 0.7 && category == Category::Projects {
        return (
            Category::Resources,
            Some(format!(
                "reference content {:.2} overrides Projects toward Resources",
                scores.reference_content
            )),
        );
    }

    (category, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn note(text: &str, path: &str) -> (NoteContext, ContentAnalysis) {
        let ctx = NoteContext::new(text, format!("/vault/{}", path), "/vault");
        let analysis = ContentAnalysis::analyze(&ctx, Utc::now());
        (ctx, analysis)
    }

    fn policy() -> ArchivePolicy {
        ArchivePolicy::default()
    }

    #[test]
    fn test_consensus_when_categories_agree() {
        let (ctx, analysis) = note(
            "Meeting notes about ongoing team sync, weekly cadence, no deadline",
            "00-Inbox/sync.md",
        );
        let archive_policy = policy();
        let decision = decide(DecisionInputs {
            ctx: &ctx,
            analysis: &analysis,
            semantic: Ok(Verdict::new(Category::Areas, 0.65, "neighbors vote Areas")),
            llm: Ok(Verdict::new(Category::Areas, 0.8, "sphere of activity").with_folder("Team Sync")),
            weights: WeightVector::default(),
            archive_policy: &archive_policy,
        })
        .unwrap();

        assert_eq!(decision.category, Category::Areas);
        assert_eq!(decision.method, DecisionMethod::Consensus);
        assert_eq!(decision.folder_name, "Team Sync");
        assert!(decision.confidence <= defaults::CONSENSUS_CONFIDENCE_CAP);
        assert!(decision.confidence > 0.65);
        assert!(!decision.reasoning.is_empty());
    }

    #[test]
    fn test_consensus_confidence_capped() {
        let (ctx, analysis) = note("plain note", "00-Inbox/n.md");
        let archive_policy = policy();
        let decision = decide(DecisionInputs {
            ctx: &ctx,
            analysis: &analysis,
            semantic: Ok(Verdict::new(Category::Resources, 1.0, "r")),
            llm: Ok(Verdict::new(Category::Resources, 1.0, "r")),
            weights: WeightVector::default(),
            archive_policy: &archive_policy,
        })
        .unwrap();
        assert!((decision.confidence - defaults::CONSENSUS_CONFIDENCE_CAP).abs() < 1e-6);
    }

    #[test]
    fn test_discrepancy_llm_wins_on_weight() {
        let (ctx, analysis) = note("a fairly plain note without strong signals", "00-Inbox/n.md");
        let archive_policy = policy();
        let decision = decide(DecisionInputs {
            ctx: &ctx,
            analysis: &analysis,
            semantic: Ok(Verdict::new(Category::Resources, 0.4, "weak neighbors")),
            llm: Ok(Verdict::new(Category::Projects, 0.9, "clear goal").with_folder("New App")),
            weights: WeightVector { semantic: 0.3, llm: 0.7 },
            archive_policy: &archive_policy,
        })
        .unwrap();

        assert_eq!(decision.category, Category::Projects);
        assert_eq!(decision.method, DecisionMethod::LlmWeighted);
        assert_eq!(decision.folder_name, "New App");
        assert!(decision.confidence <= defaults::DISCREPANCY_CONFIDENCE_CAP);
    }

    #[test]
    fn test_discrepancy_semantic_wins_with_urgency_override() {
        // Scenario: urgent deadline note; neighbors said Resources, LLM said
        // Projects, and the urgency-reweighted semantic side wins the vote
        // but its category is corrected by the critical signal.
        let (ctx, analysis) = note("URGENT: ship OAuth fix by Friday deadline", "00-Inbox/fix.md");
        assert!(analysis.scores.urgency > 0.6);
        let archive_policy = policy();
        let decision = decide(DecisionInputs {
            ctx: &ctx,
            analysis: &analysis,
            semantic: Ok(Verdict::new(Category::Resources, 0.2, "sparse neighbors")),
            llm: Ok(Verdict::new(Category::Projects, 0.8, "deadline work").with_folder("OAuth Fix")),
            weights: WeightVector { semantic: 0.9, llm: 0.1 },
            archive_policy: &archive_policy,
        })
        .unwrap();

        assert_eq!(decision.method, DecisionMethod::ChromadbWeighted);
        assert_eq!(decision.category, Category::Projects);
        assert!(decision.reasoning.contains("urgency"));
    }

    #[test]
    fn test_archive_preservation_short_circuits() {
        let ctx = NoteContext::new(
            "Trabajo completado hace tiempo.",
            "/vault/04-Archive/Viejos/nota.md",
            "/vault",
        )
        .with_last_modified(Utc::now() - Duration::days(400));
        let analysis = ContentAnalysis::analyze(&ctx, Utc::now());
        let archive_policy = policy();
        let decision = decide(DecisionInputs {
            ctx: &ctx,
            analysis: &analysis,
            semantic: Ok(Verdict::new(Category::Projects, 0.9, "ignored")),
            llm: Ok(Verdict::new(Category::Projects, 0.9, "ignored")),
            weights: WeightVector::default(),
            archive_policy: &archive_policy,
        })
        .unwrap();

        assert_eq!(decision.method, DecisionMethod::ArchivePreservation);
        assert_eq!(decision.category, Category::Archive);
        assert_eq!(decision.folder_name, "Viejos");
        assert!((decision.confidence - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_llm_unavailable_falls_back_to_semantic() {
        let (ctx, analysis) = note("ordinary content", "00-Inbox/n.md");
        let archive_policy = policy();
        let decision = decide(DecisionInputs {
            ctx: &ctx,
            analysis: &analysis,
            semantic: Ok(Verdict::new(Category::Areas, 0.7, "neighbors vote Areas")),
            llm: Err(Unavailable::Timeout(45)),
            weights: WeightVector::default(),
            archive_policy: &archive_policy,
        })
        .unwrap();

        assert_eq!(decision.method, DecisionMethod::ChromadbOnly);
        assert_eq!(decision.category, Category::Areas);
        assert_eq!(decision.llm_score, 0.0);
        assert!(decision.reasoning.contains("timed out"));
    }

    #[test]
    fn test_semantic_unavailable_falls_back_to_llm() {
        let (ctx, analysis) = note("ordinary content", "00-Inbox/n.md");
        let archive_policy = policy();
        let decision = decide(DecisionInputs {
            ctx: &ctx,
            analysis: &analysis,
            semantic: Err(Unavailable::EmptyIndex),
            llm: Ok(Verdict::new(Category::Resources, 0.8, "reference note").with_folder("Guides")),
            weights: WeightVector::default(),
            archive_policy: &archive_policy,
        })
        .unwrap();

        assert_eq!(decision.method, DecisionMethod::LlmOnly);
        assert_eq!(decision.category, Category::Resources);
        assert_eq!(decision.folder_name, "Guides");
        assert_eq!(decision.semantic_score, 0.0);
    }

    #[test]
    fn test_both_unavailable_is_an_error() {
        let (ctx, analysis) = note("ordinary content", "00-Inbox/n.md");
        let archive_policy = policy();
        let result = decide(DecisionInputs {
            ctx: &ctx,
            analysis: &analysis,
            semantic: Err(Unavailable::EmptyIndex),
            llm: Err(Unavailable::Timeout(45)),
            weights: WeightVector::default(),
            archive_policy: &archive_policy,
        });
        assert!(matches!(result, Err(Error::ClassifiersUnavailable(_))));
    }

    #[test]
    fn test_completed_note_overridden_to_archive() {
        let (ctx, analysis) = note(
            "Migration finished and delivered. Everything concluded last quarter.",
            "00-Inbox/done.md",
        );
        let archive_policy = policy();
        let decision = decide(DecisionInputs {
            ctx: &ctx,
            analysis: &analysis,
            semantic: Ok(Verdict::new(Category::Projects, 0.9, "project neighbors")),
            llm: Err(Unavailable::Timeout(45)),
            weights: WeightVector::default(),
            archive_policy: &archive_policy,
        })
        .unwrap();
        assert_eq!(decision.category, Category::Archive);
        assert!(decision.reasoning.contains("completion"));
    }

    #[test]
    fn test_confidence_always_in_unit_range() {
        let (ctx, analysis) = note("any note at all", "00-Inbox/n.md");
        let archive_policy = policy();
        for (s_conf, l_conf) in [(0.0, 0.0), (1.0, 1.0), (0.2, 0.9), (0.9, 0.2)] {
            let decision = decide(DecisionInputs {
                ctx: &ctx,
                analysis: &analysis,
                semantic: Ok(Verdict::new(Category::Areas, s_conf, "r")),
                llm: Ok(Verdict::new(Category::Projects, l_conf, "r")),
                weights: WeightVector::default(),
                archive_policy: &archive_policy,
            })
            .unwrap();
            assert!((0.0..=1.0).contains(&decision.confidence));
        }
    }
}
