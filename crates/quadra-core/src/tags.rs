//! Tag extraction and cleanup.
//!
//! Tags arrive from two sources — inline `#tag` tokens and frontmatter
//! `tags:` entries — and are merged with de-duplication. Tokens that carry
//! no semantic value (bare numbers, single characters, long identifier-like
//! strings, path-ish tokens) are filtered out before any downstream scoring
//! sees them.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

static INLINE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([A-Za-z0-9_][A-Za-z0-9_-]*)").expect("valid inline tag regex"));

/// Extract inline `#tag` tokens from note text and merge them with
/// frontmatter-supplied tags, deduplicated and cleaned.
///
/// The result is ordered (BTreeSet) so analysis output is deterministic.
pub fn extract_tags(text: &str, frontmatter_tags: &[String]) -> BTreeSet<String> {
    let mut tags: BTreeSet<String> = frontmatter_tags
        .iter()
        .map(|t| t.trim().trim_start_matches('#').to_string())
        .collect();

    for capture in INLINE_TAG.captures_iter(text) {
        tags.insert(capture[1].to_string());
    }

    clean_tags(tags)
}

/// Drop tags with no semantic value.
///
/// Filtered: numeric-only tokens, tokens of length ≤ 1, tokens longer than
/// 20 characters that contain digits (auto-generated identifiers), and
/// tokens containing `/` or `#`.
pub fn clean_tags(tags: BTreeSet<String>) -> BTreeSet<String> {
    tags.into_iter()
        .filter(|tag| {
            if tag.len() <= 1 {
                return false;
            }
            if tag.chars().all(|c| c.is_ascii_digit()) {
                return false;
            }
            if tag.len() > 20 && tag.chars().any(|c| c.is_ascii_digit()) {
                return false;
            }
            if tag.contains('/') || tag.contains('#') {
                return false;
            }
            true
        })
        .collect()
}

/// Tags that mark a note with an explicit PARA intent (`#project`, `#area`,
/// `#resource`, `#archive`, `#inbox`).
pub fn para_tags(tags: &BTreeSet<String>) -> Vec<String> {
    tags.iter()
        .filter(|t| {
            matches!(
                t.to_lowercase().as_str(),
                "project" | "area" | "resource" | "archive" | "inbox"
            )
        })
        .cloned()
        .collect()
}
