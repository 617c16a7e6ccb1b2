//! Entity-and-template naming strategy.
//!
//! Extracts known entities (clients, technologies), action themes, document
//! types, and temporal markers from note content, then composes a name from
//! category-specific templates: projects lead with the client, resources
//! with the technology, areas with the theme. Components are deduplicated,
//! individually cleaned, and the joined name is capped at 40 characters.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;

use quadra_core::{defaults, Category};

use super::traditional::title_case;

static SPRINT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(sprint|phase|fase)\s*(\d+)").expect("valid sprint regex"));
static QUARTER_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bQ[1-4]\s*\d{4}").expect("valid quarter regex"));
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));
static URL_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[#?][A-Za-z0-9_]+=[A-Za-z0-9_-]+").expect("valid url param regex"));
static LONG_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9]{20,}\b").expect("valid long id regex"));
static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("valid image regex"));
static LINK_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("valid link regex"));
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Za-z]{3,}\b").expect("valid word regex"));
static HEADER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#+\s*(.+)$").expect("valid header regex"));
static BOLD_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold regex"));

const TECHNOLOGIES: &[&str] = &[
    "docker",
    "nginx",
    "wordpress",
    "git",
    "jenkins",
    "aws",
    "react",
    "node",
    "python",
    "javascript",
    "rust",
    "css",
    "html",
    "mysql",
    "postgresql",
    "mongodb",
    "redis",
    "kubernetes",
];

const DOCUMENT_TYPES: &[&str] = &[
    "meeting",
    "spec",
    "analysis",
    "planning",
    "review",
    "retrospective",
    "standup",
    "demo",
    "training",
    "onboarding",
];

const ACTION_THEMES: &[&str] = &[
    "development",
    "design",
    "testing",
    "deployment",
    "analysis",
    "planning",
    "research",
    "documentation",
    "training",
    "coaching",
];

const STOP_WORDS: &[&str] = &[
    "para", "nota", "archivo", "documento", "información", "datos", "sistema", "proceso",
    "ejemplo", "esto", "esta", "este", "más", "the", "and", "for", "are", "but", "not", "you",
    "all", "can", "con", "del", "las", "los", "una", "uno", "por", "como", "que", "web", "app",
    "file", "code", "line", "text", "user", "data", "new", "old", "get", "set", "run", "add",
    "use", "make", "work", "project", "projects", "note", "notes", "content", "folder", "with",
    "this", "that", "from", "have", "will", "gid", "url", "http", "https", "www", "com", "org",
    "net", "drive", "google", "docs", "sheets",
];

/// Extracted naming components for one note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameParts {
    pub clients: Vec<String>,
    pub technologies: Vec<String>,
    pub action_themes: Vec<String>,
    pub document_types: Vec<String>,
    pub temporal_markers: Vec<String>,
    pub priority_keywords: Vec<String>,
}

/// Intelligent namer with its known-entity tables.
#[derive(Debug, Clone, Default)]
pub struct IntelligentNamer {
    /// Client/organization names recognized in content. Vault-specific;
    /// empty by default.
    clients: BTreeSet<String>,
}

impl IntelligentNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register client names to recognize as leading project components.
    pub fn with_clients<I, S>(mut self, clients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clients = clients.into_iter().map(|c| c.into().to_lowercase()).collect();
        self
    }

    /// Extract all naming components from note content.
    pub fn analyze(&self, content: &str) -> NameParts {
        NameParts {
            clients: match_known(content, self.clients.iter().map(|s| s.as_str())),
            technologies: match_known(content, TECHNOLOGIES.iter().copied()),
            action_themes: match_known(content, ACTION_THEMES.iter().copied()),
            document_types: match_known(content, DOCUMENT_TYPES.iter().copied()),
            temporal_markers: temporal_markers(content),
            priority_keywords: priority_keywords(content, 5),
        }
    }

    /// Compose a folder name for the given category.
    pub fn name(&self, content: &str, category: Category) -> String {
        let parts = self.analyze(content);
        let mut components: Vec<String> = Vec::new();
        let mut used: BTreeSet<String> = BTreeSet::new();

        let push = |component: &str, components: &mut Vec<String>, used: &mut BTreeSet<String>| {
            let cleaned = clean_component(component);
            if !cleaned.is_empty() && used.insert(cleaned.to_lowercase()) {
                components.push(cleaned);
            }
        };

        match category {
            Category::Projects => {
                if let Some(client) = parts.clients.first() {
                    push(client, &mut components, &mut used);
                }
                if let Some(theme) = parts.action_themes.first() {
                    push(theme, &mut components, &mut used);
                } else if let Some(keyword) = parts
                    .priority_keywords
                    .iter()
                    .find(|k| !used.contains(&k.to_lowercase()))
                {
                    push(keyword, &mut components, &mut used);
                }
                if components.len() < defaults::MAX_NAME_COMPONENTS {
                    if let Some(doc_type) = parts.document_types.first() {
                        push(doc_type, &mut components, &mut used);
                    }
                }
            }
            Category::Resources | Category::Archive => {
                if let Some(tech) = parts.technologies.first() {
                    push(tech, &mut components, &mut used);
                }
                if let Some(keyword) = parts
                    .priority_keywords
                    .iter()
                    .find(|k| !used.contains(&k.to_lowercase()))
                {
                    push(keyword, &mut components, &mut used);
                }
                if components.len() < 2 {
                    if let Some(theme) = parts.action_themes.first() {
                        push(theme, &mut components, &mut used);
                    }
                }
            }
            Category::Areas => {
                if let Some(theme) = parts.action_themes.first() {
                    push(theme, &mut components, &mut used);
                }
                if let Some(keyword) = parts
                    .priority_keywords
                    .iter()
                    .find(|k| !used.contains(&k.to_lowercase()))
                {
                    push(keyword, &mut components, &mut used);
                }
            }
        }

        if components.len() < defaults::MAX_NAME_COMPONENTS {
            if let Some(marker) = parts.temporal_markers.first() {
                push(marker, &mut components, &mut used);
            }
        }

        if components.len() < 2 {
            for keyword in &parts.priority_keywords {
                push(keyword, &mut components, &mut used);
                if components.len() >= 2 {
                    break;
                }
            }
        }

        if components.is_empty() {
            return String::new();
        }

        let joined = components
            .into_iter()
            .take(defaults::MAX_NAME_COMPONENTS)
            .collect::<Vec<_>>()
            .join(" ");

        let capped = if joined.chars().count() > defaults::MAX_FOLDER_NAME_LEN {
            let truncated: String = joined
                .chars()
                .take(defaults::MAX_FOLDER_NAME_LEN - 3)
                .collect();
            format!("{}...", truncated)
        } else {
            joined
        };

        title_case(&capped)
    }
}

fn match_known<'a>(content: &str, known: impl Iterator<Item = &'a str>) -> Vec<String> {
    let lower = content.to_lowercase();
    known
        .filter(|entity| {
            // Whole-word containment check against the lowercased text.
            lower
                .split(|c: char| !c.is_alphanumeric())
                .any(|word| word == *entity)
        })
        .take(3)
        .map(title_case)
        .collect()
}

/// Extract sprint/phase/quarter markers, compressed (`Sprint 3` → `S3`).
fn temporal_markers(content: &str) -> Vec<String> {
    let mut markers = Vec::new();
    for capture in SPRINT_MARKER.captures_iter(content).take(2) {
        let kind = capture[1].to_lowercase();
        let number = &capture[2];
        let compressed = if kind == "sprint" {
            format!("S{}", number)
        } else {
            format!("P{}", number)
        };
        if !markers.contains(&compressed) {
            markers.push(compressed);
        }
    }
    if markers.len() < 2 {
        if let Some(quarter) = QUARTER_MARKER.find(content) {
            markers.push(quarter.as_str().to_uppercase().replace(' ', ""));
        }
    }
    markers.truncate(2);
    markers
}

/// Frequency-ranked keywords, with URLs, technical identifiers, and stop
/// words removed. Words appearing in headings or bold spans count double.
fn priority_keywords(content: &str, max_keywords: usize) -> Vec<String> {
    let mut cleaned = URL.replace_all(content, " ").to_string();
    cleaned = URL_PARAM.replace_all(&cleaned, " ").to_string();
    cleaned = LONG_ID.replace_all(&cleaned, " ").to_string();
    cleaned = IMAGE.replace_all(&cleaned, " ").to_string();
    cleaned = LINK_TEXT.replace_all(&cleaned, "$1").to_string();

    let mut title_words: BTreeSet<String> = BTreeSet::new();
    for capture in HEADER_LINE.captures_iter(&cleaned) {
        for word in WORD.find_iter(&capture[1]) {
            title_words.insert(word.as_str().to_lowercase());
        }
    }
    for capture in BOLD_SPAN.captures_iter(&cleaned) {
        for word in WORD.find_iter(&capture[1]) {
            title_words.insert(word.as_str().to_lowercase());
        }
    }

    let mut frequency: BTreeMap<String, usize> = BTreeMap::new();
    for word in WORD.find_iter(&cleaned) {
        let word = word.as_str().to_lowercase();
        if word.len() > 12 || STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        let weight = if title_words.contains(&word) { 2 } else { 1 };
        *frequency.entry(word).or_default() += weight;
    }

    let mut ranked: Vec<(String, usize)> = frequency.into_iter().collect();
    // Deterministic order: by descending weight, then alphabetically.
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(max_keywords)
        .map(|(word, _)| title_case(&word))
        .collect()
}

fn clean_component(component: &str) -> String {
    let kept: String = component
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(defaults::MAX_NAME_COMPONENT_LEN)
        .collect::<String>()
        .trim()
        .to_string()
}
