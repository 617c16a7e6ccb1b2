//! Dynamic per-note weighting of the two classifier opinions.
//!
//! The calculator folds an ordered list of pure factor functions over one
//! [`FactorInput`]. Each factor inspects the content analysis (plus the
//! semantic confidence, corpus size, and tag history) and contributes a
//! signed `(semantic_delta, llm_delta)` pair with an explanation string.
//! Critical factors (urgency, deadlines, completion, reference content, tag
//! coherence) move the totals several times harder than auxiliary ones
//! (stakeholder mentions, emotional tone). The folded totals are normalized
//! to sum 1.0 and clamped to [0.1, 0.9].
//!
//! The calculator performs no I/O and holds no state; it must be re-run per
//! note, never cached across notes.

use quadra_core::{
    defaults, CompletionStatus, ContentAnalysis, ContentType, EmotionalTone, KnowledgeDepth,
    RecencyBucket, TemporalContext, WeightVector,
};
use tracing::debug;

/// Everything a weight factor may inspect.
#[derive(Debug, Clone)]
pub struct FactorInput<'a> {
    /// Confidence of the semantic verdict (0.0 when unavailable).
    pub semantic_confidence: f32,
    pub analysis: &'a ContentAnalysis,
    /// Total notes indexed by the vector search collaborator.
    pub corpus_size: usize,
    /// Strongest historical tag→folder dominance among the note's tags.
    pub tag_dominance: Option<(String, f32)>,
    /// The note's filename carries an automatic-duplicate suffix.
    pub is_duplicate_filename: bool,
}

/// One factor's contribution.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorAdjustment {
    pub semantic_delta: f32,
    pub llm_delta: f32,
    pub explanation: String,
}

impl FactorAdjustment {
    fn new(semantic_delta: f32, llm_delta: f32, explanation: impl Into<String>) -> Self {
        Self {
            semantic_delta,
            llm_delta,
            explanation: explanation.into(),
        }
    }
}

/// Result of the weight calculation: the normalized vector plus the
/// explanation of every factor that fired, for the audit record.
#[derive(Debug, Clone)]
pub struct WeightReport {
    pub weights: WeightVector,
    pub factors_applied: Vec<String>,
}

type Factor = fn(&FactorInput) -> Option<FactorAdjustment>;

/// Ordered factor list. Order only affects explanation ordering; the fold
/// is commutative.
const FACTORS: &[Factor] = &[
    semantic_confidence_factor,
    content_length_factor,
    para_tags_factor,
    content_patterns_factor,
    recency_factor,
    directive_factor,
    corpus_size_factor,
    structure_factor,
    file_size_factor,
    frontmatter_factor,
    info_density_factor,
    urgency_factor,
    temporal_context_factor,
    completion_factor,
    action_verbs_factor,
    outcome_factor,
    stakeholder_factor,
    knowledge_depth_factor,
    reference_content_factor,
    project_vs_resource_factor,
    content_type_factor,
    emotional_tone_factor,
    duplicate_factor,
    tag_coherence_factor,
];

/// Fold all factors and normalize.
pub fn calculate_weights(input: &FactorInput) -> WeightReport {
    let mut semantic = defaults::BASE_SEMANTIC_WEIGHT;
    let mut llm = defaults::BASE_LLM_WEIGHT;
    let mut factors_applied = Vec::new();

    for factor in FACTORS {
        if let Some(adjustment) = factor(input) {
            semantic += adjustment.semantic_delta;
            llm += adjustment.llm_delta;
            factors_applied.push(adjustment.explanation);
        }
    }

    let weights = WeightVector::from_raw(semantic, llm);
    debug!(
        semantic_weight = weights.semantic,
        llm_weight = weights.llm,
        factor_count = factors_applied.len(),
        "dynamic weights computed"
    );

    WeightReport {
        weights,
        factors_applied,
    }
}

fn semantic_confidence_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let c = input.semantic_confidence;
    if c > 0.8 {
        Some(FactorAdjustment::new(
            0.25,
            -0.15,
            format!("high semantic confidence ({:.2})", c),
        ))
    } else if c > 0.6 {
        Some(FactorAdjustment::new(
            0.15,
            -0.10,
            format!("solid semantic confidence ({:.2})", c),
        ))
    } else if c < 0.3 {
        Some(FactorAdjustment::new(
            -0.25,
            0.25,
            format!("weak semantic confidence ({:.2})", c),
        ))
    } else {
        None
    }
}

fn content_length_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let words = input.analysis.word_count;
    if words > 1000 {
        Some(FactorAdjustment::new(
            -0.10,
            0.20,
            format!("very long note ({} words)", words),
        ))
    } else if words > 500 {
        Some(FactorAdjustment::new(
            -0.05,
            0.15,
            format!("long note ({} words)", words),
        ))
    } else if words < 20 {
        Some(FactorAdjustment::new(
            0.25,
            -0.15,
            format!("very short note ({} words)", words),
        ))
    } else if words < 50 {
        Some(FactorAdjustment::new(
            0.15,
            -0.10,
            format!("short note ({} words)", words),
        ))
    } else {
        None
    }
}

fn para_tags_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let para = &input.analysis.para_tags;
    if para.is_empty() {
        return None;
    }
    // Explicit PARA tags are a critical placement signal.
    let per_tag = 0.1 * para.len() as f32;
    Some(FactorAdjustment::new(
        0.2 + per_tag,
        -0.1,
        format!("explicit PARA tags: {}", para.join(", ")),
    ))
}

fn content_patterns_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let a = input.analysis;
    let mut semantic = 0.0;
    let mut parts: Vec<&str> = Vec::new();

    if a.has_todos && a.has_dates {
        semantic += 0.2;
        parts.push("todos with dates");
    } else if a.has_todos {
        semantic += 0.15;
        parts.push("todo markers");
    } else if a.has_dates {
        semantic += 0.1;
        parts.push("explicit dates");
    }

    if a.has_links {
        semantic += match a.link_count {
            n if n > 10 => 0.15,
            n if n > 5 => 0.10,
            _ => 0.05,
        };
        parts.push("wikilinks");
    }

    if a.has_attachments {
        semantic += 0.1;
        parts.push("attachments");
    }

    if parts.is_empty() {
        None
    } else {
        Some(FactorAdjustment::new(
            semantic,
            0.0,
            format!("content patterns: {}", parts.join(", ")),
        ))
    }
}

fn recency_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    match input.analysis.recency? {
        RecencyBucket::VeryRecent => Some(FactorAdjustment::new(
            -0.05,
            0.15,
            "modified within the last week",
        )),
        RecencyBucket::Recent => Some(FactorAdjustment::new(0.0, 0.10, "recently modified")),
        RecencyBucket::Old => Some(FactorAdjustment::new(
            0.15,
            -0.10,
            "untouched for over 90 days",
        )),
        RecencyBucket::Moderate => None,
    }
}

fn directive_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let keywords = &input.analysis.directive_keywords;
    if keywords.is_empty() {
        return None;
    }
    // The LLM is the side that actually reads the directive.
    let extra = 0.1 * keywords.len() as f32;
    Some(FactorAdjustment::new(
        -0.15,
        0.3 + extra,
        format!("directive keywords: {}", keywords.join(", ")),
    ))
}

fn corpus_size_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let n = input.corpus_size;
    if n < defaults::SMALL_CORPUS {
        Some(FactorAdjustment::new(
            -0.20,
            0.25,
            format!("tiny corpus ({} notes)", n),
        ))
    } else if n < 20 {
        Some(FactorAdjustment::new(
            -0.10,
            0.15,
            format!("small corpus ({} notes)", n),
        ))
    } else if n > defaults::LARGE_CORPUS {
        Some(FactorAdjustment::new(
            0.15,
            -0.10,
            format!("large corpus ({} notes)", n),
        ))
    } else if n > 100 {
        Some(FactorAdjustment::new(
            0.10,
            -0.05,
            format!("sizeable corpus ({} notes)", n),
        ))
    } else {
        None
    }
}

fn structure_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let a = input.analysis;
    let mut semantic = 0.0;
    if a.has_headers {
        semantic += 0.05;
    }
    if a.has_lists {
        semantic += 0.05;
    }
    if a.has_tables {
        semantic += 0.10;
    }
    if a.has_code_blocks {
        semantic += 0.10;
    }
    if semantic > 0.0 {
        Some(FactorAdjustment::new(semantic, 0.0, "structured markdown"))
    } else {
        None
    }
}

fn file_size_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let size = input.analysis.file_size;
    if size > 10_000 {
        Some(FactorAdjustment::new(-0.05, 0.10, "large file"))
    } else if size > 0 && size < 1000 {
        Some(FactorAdjustment::new(0.10, -0.05, "small file"))
    } else {
        None
    }
}

fn frontmatter_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    if input.analysis.frontmatter.is_empty() {
        None
    } else {
        Some(FactorAdjustment::new(0.10, -0.05, "structured frontmatter"))
    }
}

fn info_density_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let density = input.analysis.info_density();
    if density > 0.1 {
        Some(FactorAdjustment::new(
            0.15,
            0.0,
            format!("high information density ({:.2})", density),
        ))
    } else if density > 0.05 {
        Some(FactorAdjustment::new(
            0.10,
            0.0,
            format!("moderate information density ({:.2})", density),
        ))
    } else {
        None
    }
}

fn urgency_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let urgency = input.analysis.scores.urgency;
    if urgency > 0.6 {
        Some(FactorAdjustment::new(
            0.60,
            -0.35,
            format!("critical urgency ({:.2})", urgency),
        ))
    } else if urgency > 0.3 {
        Some(FactorAdjustment::new(
            0.40,
            -0.25,
            format!("elevated urgency ({:.2})", urgency),
        ))
    } else if urgency > 0.1 {
        Some(FactorAdjustment::new(
            0.20,
            -0.10,
            format!("mild urgency ({:.2})", urgency),
        ))
    } else {
        None
    }
}

fn temporal_context_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    match input.analysis.scores.temporal_context {
        TemporalContext::DeadlineDriven => {
            Some(FactorAdjustment::new(0.45, -0.25, "deadline-driven content"))
        }
        TemporalContext::Scheduled => {
            Some(FactorAdjustment::new(0.35, -0.20, "scheduled/recurring content"))
        }
        TemporalContext::Evergreen => {
            Some(FactorAdjustment::new(-0.20, 0.35, "evergreen reference content"))
        }
        TemporalContext::Neutral => Some(FactorAdjustment::new(0.0, 0.10, "no temporal framing")),
    }
}

fn completion_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    match input.analysis.scores.completion_status {
        CompletionStatus::Completed => {
            Some(FactorAdjustment::new(-0.40, 0.70, "marked completed"))
        }
        CompletionStatus::InProgress => {
            Some(FactorAdjustment::new(0.30, -0.15, "work in progress"))
        }
        CompletionStatus::Planning => {
            Some(FactorAdjustment::new(0.25, -0.12, "planning-stage content"))
        }
        CompletionStatus::Unknown => None,
    }
}

fn action_verbs_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let density = input.analysis.scores.action_verb_density;
    if density > 0.05 {
        Some(FactorAdjustment::new(
            0.08,
            -0.03,
            format!("dense action verbs ({:.3})", density),
        ))
    } else if density > 0.03 {
        Some(FactorAdjustment::new(
            0.05,
            -0.02,
            format!("moderate action verbs ({:.3})", density),
        ))
    } else if density < 0.01 && input.analysis.word_count > 0 {
        Some(FactorAdjustment::new(0.0, 0.03, "few action verbs"))
    } else {
        None
    }
}

fn outcome_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let score = input.analysis.scores.outcome_specificity;
    if score > 0.7 {
        Some(FactorAdjustment::new(
            0.10,
            -0.05,
            format!("very specific outcomes ({:.2})", score),
        ))
    } else if score > 0.4 {
        Some(FactorAdjustment::new(
            0.06,
            -0.03,
            format!("specific outcomes ({:.2})", score),
        ))
    } else {
        None
    }
}

fn stakeholder_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let density = input.analysis.scores.stakeholder_density;
    if density > 0.03 {
        Some(FactorAdjustment::new(0.06, -0.03, "many stakeholder mentions"))
    } else if density > 0.01 {
        Some(FactorAdjustment::new(0.03, -0.02, "some stakeholder mentions"))
    } else {
        None
    }
}

fn knowledge_depth_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    match input.analysis.scores.knowledge_depth {
        KnowledgeDepth::ReferenceMaterial => {
            Some(FactorAdjustment::new(-0.30, 0.50, "reference material"))
        }
        KnowledgeDepth::DeepTechnical => {
            Some(FactorAdjustment::new(-0.25, 0.45, "deep technical content"))
        }
        KnowledgeDepth::Procedural => {
            Some(FactorAdjustment::new(0.25, -0.12, "procedural knowledge"))
        }
        KnowledgeDepth::Actionable => {
            Some(FactorAdjustment::new(0.30, -0.15, "actionable knowledge"))
        }
        KnowledgeDepth::Surface | KnowledgeDepth::Unknown => None,
    }
}

fn reference_content_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let score = input.analysis.scores.reference_content;
    if score > 0.7 {
        Some(FactorAdjustment::new(
            -0.35,
            0.60,
            format!("strong reference content ({:.2})", score),
        ))
    } else if score > 0.5 {
        Some(FactorAdjustment::new(
            -0.25,
            0.40,
            format!("probable reference content ({:.2})", score),
        ))
    } else if score > 0.3 {
        Some(FactorAdjustment::new(
            -0.15,
            0.25,
            format!("some reference content ({:.2})", score),
        ))
    } else {
        None
    }
}

fn project_vs_resource_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let score = input.analysis.scores.project_vs_resource;
    if score < 0.3 {
        Some(FactorAdjustment::new(
            -0.30,
            0.55,
            format!("clearly resource-shaped ({:.2})", score),
        ))
    } else if score > 0.7 {
        Some(FactorAdjustment::new(
            0.45,
            -0.25,
            format!("clearly project-shaped ({:.2})", score),
        ))
    } else if score > 0.5 {
        Some(FactorAdjustment::new(
            0.30,
            -0.15,
            format!("probably project-shaped ({:.2})", score),
        ))
    } else {
        None
    }
}

fn content_type_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    match input.analysis.scores.content_type {
        ContentType::Specification | ContentType::Documentation => {
            Some(FactorAdjustment::new(-0.25, 0.45, "specification/documentation"))
        }
        ContentType::Tutorial => Some(FactorAdjustment::new(-0.20, 0.40, "tutorial content")),
        ContentType::ActiveTask => Some(FactorAdjustment::new(0.40, -0.20, "active task content")),
        ContentType::Planning => Some(FactorAdjustment::new(0.35, -0.15, "planning content")),
        ContentType::Other => None,
    }
}

fn emotional_tone_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    match input.analysis.scores.emotional_tone {
        EmotionalTone::HighStress => Some(FactorAdjustment::new(0.08, -0.04, "high-stress tone")),
        EmotionalTone::Excitement => Some(FactorAdjustment::new(0.06, -0.03, "excited tone")),
        EmotionalTone::NeutralAnalytical => {
            Some(FactorAdjustment::new(-0.02, 0.05, "analytical tone"))
        }
        EmotionalTone::Unknown => None,
    }
}

fn duplicate_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    if input.is_duplicate_filename {
        // Both sides distrusted; the resolver should handle this file.
        Some(FactorAdjustment::new(
            -0.15,
            -0.08,
            "automatic-duplicate filename",
        ))
    } else {
        None
    }
}

fn tag_coherence_factor(input: &FactorInput) -> Option<FactorAdjustment> {
    let (folder, dominance) = input.tag_dominance.as_ref()?;
    if *dominance > defaults::TAG_DOMINANCE_THRESHOLD {
        Some(FactorAdjustment::new(
            0.60,
            -0.25,
            format!("tag history dominates folder '{}' ({:.2})", folder, dominance),
        ))
    } else if *dominance > 0.5 {
        Some(FactorAdjustment::new(
            0.40,
            -0.18,
            format!("tag history favors folder '{}' ({:.2})", folder, dominance),
        ))
    } else if *dominance > 0.3 {
        Some(FactorAdjustment::new(
            0.20,
            -0.10,
            format!("tag history leans toward '{}' ({:.2})", folder, dominance),
        ))
    } else {
        None
    }
}
