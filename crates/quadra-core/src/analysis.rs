//! Content analysis: structural and semantic facts about one note.
//!
//! [`ContentAnalysis::analyze`] is a pure function of the note context plus
//! an explicit `now` timestamp; identical inputs always produce identical
//! analyses. Malformed pieces (bad frontmatter YAML, unreadable metadata)
//! degrade to their empty values rather than failing the note.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::heuristics::HeuristicScores;
use crate::models::NoteContext;
use crate::tags::{extract_tags, para_tags};
use crate::temporal::RecencyBucket;

static FRONTMATTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---(\r?\n|\z)").expect("valid frontmatter regex"));
static TODO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)- \[ \].*|#todo\b|\btodo:").expect("valid todo regex"));
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\d{4}-\d{2}-\d{2}",
        r"\d{2}/\d{2}/\d{4}",
        r"\d{1,2}/\d{1,2}/\d{2,4}",
        r"(?i)\b\d{1,2}\s+(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\w*\s+\d{4}\b",
        r"(?i)\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\w*\s+\d{1,2},?\s+\d{4}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid date regex"))
    .collect()
});
static WIKILINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("valid wikilink regex"));
static ATTACHMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]+\)").expect("valid attachment regex"));
static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s+").expect("valid header regex"));
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[-*+]\s+").expect("valid list regex"));
static TABLE_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|.+\|").expect("valid table regex"));
static DIRECTIVE_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(project|area|resource|archive|inbox|urgent|important|reference|template)\b")
        .expect("valid directive keyword regex")
});

/// Derived facts about one note, computed once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    /// Deduplicated, cleaned tag set from inline tokens and frontmatter.
    pub tags: BTreeSet<String>,
    /// Tags carrying an explicit PARA intent (`#project`, `#archive`, ...).
    pub para_tags: Vec<String>,
    /// Parsed frontmatter; empty map when absent or malformed.
    pub frontmatter: BTreeMap<String, serde_json::Value>,
    pub has_todos: bool,
    pub has_dates: bool,
    pub has_links: bool,
    pub has_attachments: bool,
    pub has_headers: bool,
    pub has_lists: bool,
    pub has_tables: bool,
    pub has_code_blocks: bool,
    pub word_count: usize,
    pub todo_count: usize,
    pub link_count: usize,
    pub file_size: u64,
    /// Days since last modification, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_since_modified: Option<i64>,
    /// Recency bucket, when the modification time is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recency: Option<RecencyBucket>,
    /// PARA keywords found in the user directive.
    pub directive_keywords: Vec<String>,
    /// Independently computed heuristic scores.
    pub scores: HeuristicScores,
}

impl ContentAnalysis {
    /// Analyze a note. Deterministic for identical `(ctx, now)` inputs.
    pub fn analyze(ctx: &NoteContext, now: DateTime<Utc>) -> Self {
        let text = ctx.text.as_str();
        if text.trim().is_empty() {
            debug!(path = %ctx.path.display(), "empty note, degenerate analysis");
            let mut degenerate = Self::degenerate();
            degenerate.file_size = ctx.file_size;
            return degenerate;
        }

        let frontmatter = parse_frontmatter(text);
        let frontmatter_tags = frontmatter_tag_list(&frontmatter);
        let tags = extract_tags(text, &frontmatter_tags);
        let para = para_tags(&tags);

        let todo_count = TODO_PATTERN.find_iter(text).count();
        let link_count = WIKILINK.find_iter(text).count();
        let has_dates = DATE_PATTERNS.iter().any(|re| re.is_match(text));

        let days_since_modified = ctx.last_modified.map(|ts| (now - ts).num_days());
        let recency = days_since_modified.map(RecencyBucket::from_days);

        let directive_keywords: Vec<String> = {
            let mut seen = BTreeSet::new();
            DIRECTIVE_KEYWORD
                .find_iter(&ctx.user_directive)
                .map(|m| m.as_str().to_lowercase())
                .filter(|kw| seen.insert(kw.clone()))
                .collect()
        };

        Self {
            para_tags: para,
            tags,
            frontmatter,
            has_todos: todo_count > 0,
            has_dates,
            has_links: link_count > 0,
            has_attachments: ATTACHMENT.is_match(text),
            has_headers: HEADER.is_match(text),
            has_lists: LIST_ITEM.is_match(text),
            has_tables: TABLE_ROW.is_match(text),
            has_code_blocks: text.contains("```"),
            word_count: text.split_whitespace().count(),
            todo_count,
            link_count,
            file_size: ctx.file_size,
            days_since_modified,
            recency,
            directive_keywords,
            scores: HeuristicScores::compute(text),
        }
    }

    /// Minimal analysis for empty or unreadable notes: all flags false,
    /// zero counts, floor scores.
    pub fn degenerate() -> Self {
        Self {
            tags: BTreeSet::new(),
            para_tags: Vec::new(),
            frontmatter: BTreeMap::new(),
            has_todos: false,
            has_dates: false,
            has_links: false,
            has_attachments: false,
            has_headers: false,
            has_lists: false,
            has_tables: false,
            has_code_blocks: false,
            word_count: 0,
            todo_count: 0,
            link_count: 0,
            file_size: 0,
            days_since_modified: None,
            recency: None,
            directive_keywords: Vec::new(),
            scores: HeuristicScores::compute(""),
        }
    }

    /// Ratio of links + todos to words; high values mark organized,
    /// information-dense notes.
    pub fn info_density(&self) -> f32 {
        if self.word_count == 0 {
            return 0.0;
        }
        (self.link_count + self.todo_count) as f32 / self.word_count as f32
    }

    /// Count of unchecked `- [ ]` task markers.
    pub fn pending_todo_count(&self) -> usize {
        self.todo_count
    }
}

fn parse_frontmatter(text: &str) -> BTreeMap<String, serde_json::Value> {
    let Some(captures) = FRONTMATTER.captures(text) else {
        return BTreeMap::new();
    };
    match serde_yaml::from_str::<BTreeMap<String, serde_json::Value>>(&captures[1]) {
        Ok(map) => map,
        Err(e) => {
            debug!(error = %e, "malformed frontmatter, ignoring");
            BTreeMap::new()
        }
    }
}

fn frontmatter_tag_list(frontmatter: &BTreeMap<String, serde_json::Value>) -> Vec<String> {
    match frontmatter.get("tags") {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect(),
        Some(serde_json::Value::String(s)) => s
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> ContentAnalysis {
        let ctx = NoteContext::new(text, "/vault/00-Inbox/note.md", "/vault");
        ContentAnalysis::analyze(&ctx, Utc::now())
    }

    #[test]
    fn test_empty_note_is_degenerate() {
        let analysis = analyze("   \n  ");
        assert_eq!(analysis.word_count, 0);
        assert!(!analysis.has_todos);
        assert!(!analysis.has_links);
        assert!(analysis.tags.is_empty());
    }

    #[test]
    fn test_todo_detection() {
        let analysis = analyze("- [ ] ship it\n- [ ] test it\nTODO: review");
        assert!(analysis.has_todos);
        assert_eq!(analysis.todo_count, 3);
    }

    #[test]
    fn test_date_detection() {
        assert!(analyze("due on 2026-03-01").has_dates);
        assert!(analyze("meeting May 3, 2026").has_dates);
        assert!(!analyze("no calendar references here").has_dates);
    }

    #[test]
    fn test_link_and_attachment_detection() {
        let analysis = analyze("see [[Other Note]] and ![img](pic.png)");
        assert!(analysis.has_links);
        assert_eq!(analysis.link_count, 1);
        assert!(analysis.has_attachments);
    }

    #[test]
    fn test_structure_flags() {
        let analysis = analyze("# Title\n\n- item\n\n| a | b |\n\n```rust\ncode\n```");
        assert!(analysis.has_headers);
        assert!(analysis.has_lists);
        assert!(analysis.has_tables);
        assert!(analysis.has_code_blocks);
    }

    #[test]
    fn test_frontmatter_tags_list() {
        let analysis = analyze("---\ntitle: Note\ntags:\n  - rust\n  - engine\n---\nbody #inline");
        assert!(analysis.tags.contains("rust"));
        assert!(analysis.tags.contains("engine"));
        assert!(analysis.tags.contains("inline"));
        assert_eq!(
            analysis.frontmatter.get("title"),
            Some(&serde_json::Value::String("Note".into()))
        );
    }

    #[test]
    fn test_frontmatter_tags_comma_string() {
        let analysis = analyze("---\ntags: alpha, beta\n---\nbody");
        assert!(analysis.tags.contains("alpha"));
        assert!(analysis.tags.contains("beta"));
    }

    #[test]
    fn test_malformed_frontmatter_degrades() {
        let analysis = analyze("---\n: [unbalanced\n---\nbody text here");
        assert!(analysis.frontmatter.is_empty());
        assert!(analysis.word_count > 0);
    }

    #[test]
    fn test_recency_buckets() {
        let ctx = NoteContext::new("text body", "/vault/n.md", "/vault")
            .with_last_modified(Utc::now() - chrono::Duration::days(400));
        let analysis = ContentAnalysis::analyze(&ctx, Utc::now());
        assert_eq!(analysis.recency, Some(RecencyBucket::Old));
    }

    #[test]
    fn test_no_modified_time_means_no_recency() {
        let analysis = analyze("text");
        assert_eq!(analysis.recency, None);
    }

    #[test]
    fn test_directive_keywords() {
        let ctx = NoteContext::new("text", "/vault/n.md", "/vault")
            .with_directive("file this as an URGENT project, not a resource");
        let analysis = ContentAnalysis::analyze(&ctx, Utc::now());
        assert_eq!(
            analysis.directive_keywords,
            vec!["urgent".to_string(), "project".to_string(), "resource".to_string()]
        );
    }

    #[test]
    fn test_para_tags_detected() {
        let analysis = analyze("work note #project #rust");
        assert_eq!(analysis.para_tags, vec!["project".to_string()]);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let ctx = NoteContext::new(
            "# Plan\n- [ ] task\n#project due 2026-01-01",
            "/vault/00-Inbox/n.md",
            "/vault",
        );
        let now = Utc::now();
        assert_eq!(
            ContentAnalysis::analyze(&ctx, now),
            ContentAnalysis::analyze(&ctx, now)
        );
    }

    #[test]
    fn test_info_density() {
        let analysis = analyze("- [ ] a\n[[b]]\nword word word word word word");
        assert!(analysis.info_density() > 0.0);
        assert_eq!(ContentAnalysis::degenerate().info_density(), 0.0);
    }
}
