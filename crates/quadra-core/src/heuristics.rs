//! Independent heuristic scores over raw note text.
//!
//! Each scorer is a pure keyword/regex scan returning either a score in
//! [0.0, 1.0] or a value of a fixed class enum. Scorers are order-independent
//! and never read each other's output; a scan over degenerate input (empty
//! text) yields the floor value (0.0 / `Unknown`), so a single weak signal
//! can never abort classification.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Temporal framing of a note's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalContext {
    /// Deadlines and due dates dominate.
    DeadlineDriven,
    /// Recurring or routine activity.
    Scheduled,
    /// Timeless reference content.
    Evergreen,
    /// No clear temporal framing.
    Neutral,
}

/// Completion state signaled by the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    Completed,
    InProgress,
    Planning,
    Unknown,
}

/// Depth and character of the knowledge in a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeDepth {
    /// Lookup material: manuals, specs, glossaries.
    ReferenceMaterial,
    /// Dense technical analysis or research.
    DeepTechnical,
    /// Step-by-step or routine knowledge.
    Procedural,
    /// Task-shaped, immediately actionable content.
    Actionable,
    /// Skims and summaries.
    Surface,
    Unknown,
}

/// Coarse document type of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Specification,
    Documentation,
    Tutorial,
    ActiveTask,
    Planning,
    Other,
}

/// Emotional register of a note; an auxiliary signal only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalTone {
    HighStress,
    Excitement,
    NeutralAnalytical,
    Unknown,
}

/// All heuristic outputs for one note, computed once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicScores {
    pub urgency: f32,
    pub action_verb_density: f32,
    pub outcome_specificity: f32,
    pub stakeholder_density: f32,
    pub cross_reference_density: f32,
    pub reference_content: f32,
    pub project_vs_resource: f32,
    pub temporal_context: TemporalContext,
    pub completion_status: CompletionStatus,
    pub knowledge_depth: KnowledgeDepth,
    pub content_type: ContentType,
    pub emotional_tone: EmotionalTone,
}

impl HeuristicScores {
    /// Run every scorer over the note text.
    pub fn compute(text: &str) -> Self {
        Self {
            urgency: urgency_score(text),
            action_verb_density: action_verb_density(text),
            outcome_specificity: outcome_specificity(text),
            stakeholder_density: stakeholder_density(text),
            cross_reference_density: cross_reference_density(text),
            reference_content: reference_content_score(text),
            project_vs_resource: project_vs_resource_score(text),
            temporal_context: temporal_context(text),
            completion_status: completion_status(text),
            knowledge_depth: knowledge_depth(text),
            content_type: content_type(text),
            emotional_tone: emotional_tone(text),
        }
    }
}

static URGENCY_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(urgent|urgente|asap|immediately|critical|emergency|priority|deadline|overdue|late|hurry|quickly|time-sensitive|pressing|crucial|vital|eod)\b|must do|need to|have to|required by|due today|due tomorrow|this week|end of day",
    )
    .expect("valid urgency regex")
});

/// Urgency signal density, per 50 words, capped at 1.0.
///
/// Counts urgency keywords, plus weaker signals: exclamation marks at half
/// weight and ALL-CAPS words at 0.3 each.
pub fn urgency_score(text: &str) -> f32 {
    let words = text.split_whitespace().count();
    if words == 0 {
        return 0.0;
    }

    let keyword_hits = URGENCY_KEYWORDS.find_iter(text).count() as f32;
    let exclamations = text.matches('!').count() as f32;
    let caps_words = text
        .split_whitespace()
        .filter(|w| w.len() > 2 && w.chars().filter(|c| c.is_alphabetic()).count() > 2)
        .filter(|w| w.chars().filter(|c| c.is_alphabetic()).all(|c| c.is_uppercase()))
        .count() as f32;

    let signals = keyword_hits + exclamations * 0.5 + caps_words * 0.3;
    (signals / (words as f32 / 50.0)).min(1.0)
}

const ACTION_VERBS: &[&str] = &[
    "implement",
    "create",
    "build",
    "develop",
    "design",
    "execute",
    "launch",
    "deploy",
    "test",
    "review",
    "analyze",
    "research",
    "write",
    "document",
    "plan",
    "schedule",
    "organize",
    "coordinate",
    "manage",
    "deliver",
    "complete",
    "finish",
    "achieve",
    "solve",
    "fix",
    "improve",
    "optimize",
    "upgrade",
    "refactor",
    "migrate",
    "integrate",
    "configure",
    "install",
    "monitor",
    "track",
    "measure",
];

/// Fraction of words that contain an action verb.
pub fn action_verb_density(text: &str) -> f32 {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect();
    if words.is_empty() {
        return 0.0;
    }
    let hits = words
        .iter()
        .filter(|w| ACTION_VERBS.iter().any(|v| w.contains(v)))
        .count();
    hits as f32 / words.len() as f32
}

static OUTCOME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\d+%",
        r"\$\d+",
        r"\d+ (users?|customers?|clients?)",
        r"by \d{1,2}/\d{1,2}",
        r"within \d+ (days?|weeks?|months?)",
        r"increase.{0,20}by \d+",
        r"reduce.{0,20}by \d+",
        r"deliver \d+",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){}", p)).expect("valid outcome regex"))
    .collect()
});

/// How specific the mentioned outcomes are (quantified targets, dated
/// deliverables), per 100 words, capped at 1.0.
pub fn outcome_specificity(text: &str) -> f32 {
    let words = text.split_whitespace().count();
    if words == 0 {
        return 0.0;
    }
    let matches: usize = OUTCOME_PATTERNS.iter().map(|re| re.find_iter(text).count()).sum();
    (matches as f32 / (words as f32 / 100.0)).min(1.0)
}

static STAKEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(client|customer|user|stakeholder|team|manager|lead|developer|designer|analyst|executive|director|partner|vendor|supplier|consultant)s?\b",
    )
    .expect("valid stakeholder regex")
});

/// Density of stakeholder mentions per word.
pub fn stakeholder_density(text: &str) -> f32 {
    let words = text.split_whitespace().count();
    if words == 0 {
        return 0.0;
    }
    STAKEHOLDER_PATTERN.find_iter(text).count() as f32 / words as f32
}

static WIKILINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[[^\]]+\]\]").expect("valid wikilink regex"));
static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]\([^)]+\)").expect("valid markdown link regex"));
static REFERENCE_PHRASES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(see also|refer to|as mentioned in|according to|based on|compare with)")
        .expect("valid reference phrase regex")
});

/// Density of cross references (wikilinks, markdown links, citation
/// phrases) per word.
pub fn cross_reference_density(text: &str) -> f32 {
    let words = text.split_whitespace().count();
    if words == 0 {
        return 0.0;
    }
    let refs = WIKILINK.find_iter(text).count()
        + MARKDOWN_LINK.find_iter(text).count()
        + REFERENCE_PHRASES.find_iter(text).count();
    refs as f32 / words as f32
}

static REFERENCE_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(spec|specification|standard|protocol|api|interface|documentation|manual|guide|tutorial|reference|template|example|sample|definition|overview|summary|requirements)\b",
    )
    .expect("valid reference keyword regex")
});
static SPEC_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^#+\s*(spec|specification|standard|api|interface)")
        .expect("valid spec heading regex")
});
static DOC_SECTION_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^#+\s*(overview|description|requirements|examples)")
        .expect("valid doc section regex")
});

/// How strongly the text reads as reference material.
///
/// Keyword density plus structural bonuses: a spec-style heading, typical
/// documentation sections, fenced code, and markdown links.
pub fn reference_content_score(text: &str) -> f32 {
    let words = text.split_whitespace().count();
    if words == 0 {
        return 0.0;
    }

    let base = (REFERENCE_KEYWORDS.find_iter(text).count() as f32 / words as f32 * 100.0).min(1.0);

    let mut bonus = 0.0;
    if SPEC_HEADING.is_match(text) {
        bonus += 0.3;
    }
    bonus += DOC_SECTION_HEADING.find_iter(text).count() as f32 * 0.1;
    if text.contains("```") {
        bonus += 0.2;
    }
    if MARKDOWN_LINK.is_match(text) {
        bonus += 0.1;
    }

    (base + bonus).min(1.0)
}

static PROJECT_INDICATORS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(project|task|goal|objective|deliverable|milestone|deadline|due date|timeline|schedule|todo|progress|status|ongoing|active|plan|execute|implement|urgent|priority|team|meeting|budget|risk|issue|outcome)\b",
    )
    .expect("valid project indicator regex")
});
static RESOURCE_INDICATORS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(resource|reference|template|guide|tutorial|documentation|manual|specification|standard|knowledge|information|example|sample|definition|overview|api|interface|protocol|how to|step by step|tool|utility|library|framework|background|cheat sheet)\b",
    )
    .expect("valid resource indicator regex")
});
static UNCHECKED_TODO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)- \[ \]|#todo\b|\btodo:").expect("valid todo regex"));
static EXPLICIT_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}|\d{2}/\d{2}/\d{4}").expect("valid date regex")
});

/// Project-vs-resource distinction: 0.0 = clearly a resource, 1.0 = clearly
/// a project, 0.5 = no signal either way.
pub fn project_vs_resource_score(text: &str) -> f32 {
    let project_hits = PROJECT_INDICATORS.find_iter(text).count();
    let resource_hits = RESOURCE_INDICATORS.find_iter(text).count();
    let total = project_hits + resource_hits;
    if total == 0 {
        return 0.5;
    }

    let mut score = project_hits as f32 / total as f32;

    if UNCHECKED_TODO.find_iter(text).count() > 3 {
        score = (score + 0.2).min(1.0);
    }
    if EXPLICIT_DATE.find_iter(text).count() > 2 {
        score = (score + 0.15).min(1.0);
    }
    if SPEC_HEADING.is_match(text) {
        score = (score - 0.3).max(0.0);
    }

    score
}

static DEADLINE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"due \w+ \d+",
        r"deadline",
        r"by \d{1,2}/\d{1,2}",
        r"by \w*day\b",
        r"before \w*day\b",
        r"must\b.{0,30}\bby\b",
        r"complete\b.{0,30}\bby\b",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){}", p)).expect("valid deadline regex"))
    .collect()
});
static SCHEDULED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"every \w*day\b",
        r"\bweekly\b",
        r"\bmonthly\b",
        r"\bdaily\b",
        r"\brecurring\b",
        r"\broutine\b",
        r"\bcadence\b",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){}", p)).expect("valid scheduled regex"))
    .collect()
});
static EVERGREEN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\breference\b",
        r"\bguide\b",
        r"\btutorial\b",
        r"\bdocumentation\b",
        r"knowledge base",
        r"best practices",
        r"\bprinciples\b",
        r"\bconcepts\b",
        r"\btheory\b",
        r"\bfundamentals\b",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){}", p)).expect("valid evergreen regex"))
    .collect()
});

/// Temporal framing: deadlines beat schedules beat evergreen content.
pub fn temporal_context(text: &str) -> TemporalContext {
    let count = |patterns: &[Regex]| -> usize {
        patterns.iter().map(|re| re.find_iter(text).count()).sum()
    };

    let deadline = count(&DEADLINE_PATTERNS);
    let scheduled = count(&SCHEDULED_PATTERNS);
    let evergreen = count(&EVERGREEN_PATTERNS);

    if deadline > scheduled && deadline > evergreen {
        TemporalContext::DeadlineDriven
    } else if scheduled > evergreen && scheduled > 0 {
        TemporalContext::Scheduled
    } else if evergreen > 0 {
        TemporalContext::Evergreen
    } else {
        TemporalContext::Neutral
    }
}

const COMPLETED_INDICATORS: &[&str] = &[
    "completed",
    "completado",
    "finished",
    "finalizado",
    "done",
    "delivered",
    "achieved",
    "closed",
    "concluded",
];
const IN_PROGRESS_INDICATORS: &[&str] = &[
    "in progress",
    "ongoing",
    "active",
    "pending",
    "underway",
    "being worked on",
    "in development",
];
const PLANNING_INDICATORS: &[&str] = &[
    "proposal",
    "draft",
    "outline",
    "sketch",
    "idea",
    "concept",
    "initial",
    "preliminary",
];

/// Completion state by majority of indicator hits.
pub fn completion_status(text: &str) -> CompletionStatus {
    let lower = text.to_lowercase();
    let hits = |set: &[&str]| set.iter().filter(|kw| lower.contains(*kw)).count();

    let completed = hits(COMPLETED_INDICATORS);
    let in_progress = hits(IN_PROGRESS_INDICATORS);
    let planning = hits(PLANNING_INDICATORS);

    if completed > in_progress && completed > planning {
        CompletionStatus::Completed
    } else if in_progress > planning {
        CompletionStatus::InProgress
    } else if planning > 0 {
        CompletionStatus::Planning
    } else {
        CompletionStatus::Unknown
    }
}

const REFERENCE_DEPTH: &[&str] = &[
    "reference",
    "manual",
    "specification",
    "glossary",
    "cheat sheet",
    "documentation",
    "template",
];
const DEEP_TECHNICAL: &[&str] = &[
    "analysis",
    "research",
    "architecture",
    "algorithm",
    "technical",
    "in-depth",
    "comprehensive",
    "detailed",
];
const PROCEDURAL: &[&str] = &[
    "how to",
    "step by step",
    "procedure",
    "checklist",
    "routine",
    "instructions",
];
const ACTIONABLE: &[&str] = &["todo", "task", "action item", "next steps", "implement", "deliver"];
const SURFACE: &[&str] = &["overview", "summary", "brief", "quick", "basic", "introductory"];

/// Knowledge-depth class by strongest indicator set.
pub fn knowledge_depth(text: &str) -> KnowledgeDepth {
    let lower = text.to_lowercase();
    let hits = |set: &[&str]| set.iter().filter(|kw| lower.contains(*kw)).count();

    let scored = [
        (KnowledgeDepth::ReferenceMaterial, hits(REFERENCE_DEPTH)),
        (KnowledgeDepth::DeepTechnical, hits(DEEP_TECHNICAL)),
        (KnowledgeDepth::Procedural, hits(PROCEDURAL)),
        (KnowledgeDepth::Actionable, hits(ACTIONABLE)),
        (KnowledgeDepth::Surface, hits(SURFACE)),
    ];

    let best = scored.iter().max_by_key(|(_, n)| *n).copied();
    match best {
        Some((depth, n)) if n > 0 => depth,
        _ => KnowledgeDepth::Unknown,
    }
}

static CONTENT_TYPE_PATTERNS: Lazy<Vec<(ContentType, Regex)>> = Lazy::new(|| {
    [
        (
            ContentType::Specification,
            r"(?im)\b(spec|specification|standard|protocol)\b|^#+\s*(spec|specification|standard)|interface definition",
        ),
        (
            ContentType::Documentation,
            r"(?im)\b(documentation|manual|readme|installation|configuration)\b|^#+\s*(documentation|manual)",
        ),
        (
            ContentType::Tutorial,
            r"(?im)\b(tutorial|how to|step by step|walkthrough|instructions)\b|^#+\s*(tutorial|guide)",
        ),
        (
            ContentType::ActiveTask,
            r"(?i)\b(in progress|working on|deadline|due date|urgent|action items|next steps|status report)\b",
        ),
        (
            ContentType::Planning,
            r"(?im)\b(planning|strategy|proposal|roadmap|timeline|milestone)\b|^#+\s*(plan|strategy|proposal)",
        ),
    ]
    .iter()
    .map(|(ty, p)| (*ty, Regex::new(p).expect("valid content type regex")))
    .collect()
});

/// Coarse document type by strongest pattern family; requires at least two
/// hits to commit, otherwise `Other`.
pub fn content_type(text: &str) -> ContentType {
    let mut best = ContentType::Other;
    let mut best_hits = 0usize;
    for (ty, re) in CONTENT_TYPE_PATTERNS.iter() {
        let hits = re.find_iter(text).count();
        if hits > best_hits {
            best_hits = hits;
            best = *ty;
        }
    }
    if best_hits >= 2 {
        best
    } else {
        ContentType::Other
    }
}

const STRESS_WORDS: &[&str] = &[
    "frustrated",
    "angry",
    "disappointed",
    "failed",
    "problem",
    "broken",
    "difficult",
    "overwhelmed",
];
const EXCITEMENT_WORDS: &[&str] = &[
    "excited",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "successful",
    "progress",
    "growth",
];
const ANALYTICAL_WORDS: &[&str] = &["objective", "factual", "informational", "reference", "neutral"];

/// Emotional register by majority of indicator hits; auxiliary signal only.
pub fn emotional_tone(text: &str) -> EmotionalTone {
    let lower = text.to_lowercase();
    let hits = |set: &[&str]| set.iter().filter(|kw| lower.contains(*kw)).count();

    let stress = hits(STRESS_WORDS);
    let excitement = hits(EXCITEMENT_WORDS);
    let analytical = hits(ANALYTICAL_WORDS);

    if stress > excitement && stress > analytical {
        EmotionalTone::HighStress
    } else if excitement > stress && excitement > analytical {
        EmotionalTone::Excitement
    } else if analytical > 0 {
        EmotionalTone::NeutralAnalytical
    } else {
        EmotionalTone::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_empty_text() {
        assert_eq!(urgency_score(""), 0.0);
    }

    #[test]
    fn test_urgency_high_for_urgent_note() {
        let score = urgency_score("URGENT: ship OAuth fix by Friday deadline");
        assert!(score > 0.6, "expected high urgency, got {}", score);
    }

    #[test]
    fn test_urgency_low_for_calm_note() {
        let score = urgency_score(
            "Collected reading notes on distributed systems papers from the last quarter. \
             Mostly background material for later reference with no particular rush attached.",
        );
        assert!(score < 0.3, "expected low urgency, got {}", score);
    }

    #[test]
    fn test_urgency_capped_at_one() {
        let score = urgency_score("URGENT URGENT URGENT!!! asap deadline critical");
        assert!(score <= 1.0);
    }

    #[test]
    fn test_action_verb_density() {
        assert!(action_verb_density("implement build deploy test") > 0.9);
        assert_eq!(action_verb_density(""), 0.0);
        assert!(action_verb_density("the weather was nice yesterday") < 0.01);
    }

    #[test]
    fn test_outcome_specificity_quantified() {
        let text = "Increase signups by 40% and deliver 3 dashboards within 2 weeks";
        assert!(outcome_specificity(text) > 0.0);
        assert_eq!(outcome_specificity(""), 0.0);
    }

    #[test]
    fn test_stakeholder_density() {
        assert!(stakeholder_density("Meeting with the client and their team lead") > 0.0);
        assert_eq!(stakeholder_density("nothing relevant here"), 0.0);
    }

    #[test]
    fn test_cross_reference_density() {
        let text = "See also [[Other Note]] and [docs](https://example.com)";
        assert!(cross_reference_density(text) > 0.0);
    }

    #[test]
    fn test_reference_content_score_spec() {
        let text = "# Specification\n\n## Overview\n\nThe API interface standard.\n```\ncode\n```";
        assert!(reference_content_score(text) > 0.5);
    }

    #[test]
    fn test_reference_content_score_floor() {
        assert_eq!(reference_content_score(""), 0.0);
    }

    #[test]
    fn test_project_vs_resource_neutral() {
        assert_eq!(project_vs_resource_score("the cat sat on the mat"), 0.5);
    }

    #[test]
    fn test_project_vs_resource_project_side() {
        let text = "Project milestone deadline: deliverable due, task list in progress, urgent";
        assert!(project_vs_resource_score(text) > 0.7);
    }

    #[test]
    fn test_project_vs_resource_resource_side() {
        let text = "Reference guide and tutorial documentation, API template examples";
        assert!(project_vs_resource_score(text) < 0.3);
    }

    #[test]
    fn test_temporal_context_deadline() {
        assert_eq!(
            temporal_context("URGENT: ship OAuth fix by Friday deadline"),
            TemporalContext::DeadlineDriven
        );
    }

    #[test]
    fn test_temporal_context_scheduled() {
        assert_eq!(
            temporal_context("Weekly team sync, recurring cadence every Monday"),
            TemporalContext::Scheduled
        );
    }

    #[test]
    fn test_temporal_context_evergreen() {
        assert_eq!(
            temporal_context("Reference guide on sorting theory fundamentals"),
            TemporalContext::Evergreen
        );
    }

    #[test]
    fn test_temporal_context_neutral() {
        assert_eq!(temporal_context("random thoughts"), TemporalContext::Neutral);
    }

    #[test]
    fn test_completion_status_completed_spanish() {
        assert_eq!(
            completion_status("Proyecto completado y finalizado"),
            CompletionStatus::Completed
        );
    }

    #[test]
    fn test_completion_status_in_progress() {
        assert_eq!(
            completion_status("Work is ongoing and still pending review"),
            CompletionStatus::InProgress
        );
    }

    #[test]
    fn test_completion_status_unknown() {
        assert_eq!(completion_status("hello world"), CompletionStatus::Unknown);
    }

    #[test]
    fn test_knowledge_depth_reference() {
        assert_eq!(
            knowledge_depth("API reference manual with a glossary and specification"),
            KnowledgeDepth::ReferenceMaterial
        );
    }

    #[test]
    fn test_knowledge_depth_unknown_for_empty() {
        assert_eq!(knowledge_depth(""), KnowledgeDepth::Unknown);
    }

    #[test]
    fn test_content_type_specification() {
        let text = "# Spec\n\nThis specification defines the wire protocol standard.";
        assert_eq!(content_type(text), ContentType::Specification);
    }

    #[test]
    fn test_content_type_other_for_weak_signal() {
        assert_eq!(content_type("just one word: tutorial"), ContentType::Other);
    }

    #[test]
    fn test_emotional_tone() {
        assert_eq!(
            emotional_tone("So excited, this is great and amazing progress"),
            EmotionalTone::Excitement
        );
        assert_eq!(emotional_tone(""), EmotionalTone::Unknown);
    }

    #[test]
    fn test_scores_all_in_unit_range() {
        let texts = [
            "",
            "URGENT!!! deadline asap",
            "reference manual documentation spec",
            "a b c d e f g",
        ];
        for text in texts {
            let scores = HeuristicScores::compute(text);
            for value in [
                scores.urgency,
                scores.action_verb_density,
                scores.outcome_specificity,
                scores.stakeholder_density,
                scores.cross_reference_density,
                scores.reference_content,
                scores.project_vs_resource,
            ] {
                assert!((0.0..=1.0).contains(&value), "out of range for {:?}", text);
            }
        }
    }

    #[test]
    fn test_compute_is_deterministic() {
        let text = "Project deadline next week, see [[notes]] #project";
        assert_eq!(HeuristicScores::compute(text), HeuristicScores::compute(text));
    }
}
