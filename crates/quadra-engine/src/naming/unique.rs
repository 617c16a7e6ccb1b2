//! Uniqueness resolution: consolidate instead of fragmenting.
//!
//! A candidate folder name that already exists in the vault — exactly or
//! modulo a trailing numeric suffix — resolves to the existing folder. The
//! engine never mints `Name_2`-style siblings; when several existing
//! folders share the normalized base name, the one holding the most notes
//! wins.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use quadra_core::VaultFolders;

static TRAILING_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(_\d+|\s+\d+)$").expect("valid suffix regex"));
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid non-word regex"));

/// Normalize a folder name for duplicate comparison: strip trailing `_N` /
/// ` N` suffixes and punctuation, lowercase, collapse whitespace.
pub fn normalize_for_comparison(name: &str) -> String {
    let stripped = TRAILING_SUFFIX.replace(name, "");
    let cleaned = NON_WORD.replace_all(&stripped, "");
    cleaned
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve a candidate name against the vault's existing folders.
///
/// Returns the candidate itself when it is genuinely new, or the existing
/// folder to consolidate into when a base-name match exists.
pub fn resolve_unique(candidate: &str, category_folder: &str, vault: &dyn VaultFolders) -> String {
    let existing = vault.list_subfolders(category_folder);

    // Exact match: reuse the existing folder as-is.
    if existing.contains(candidate) {
        debug!(folder = candidate, "exact folder match, consolidating");
        return candidate.to_string();
    }

    let candidate_base = normalize_for_comparison(candidate);
    if candidate_base.is_empty() {
        return candidate.to_string();
    }

    let matches: Vec<&String> = existing
        .iter()
        .filter(|name| normalize_for_comparison(name) == candidate_base)
        .collect();

    if matches.is_empty() {
        return candidate.to_string();
    }

    // Several variants exist; consolidate into the most populated one.
    // BTreeSet iteration keeps ties deterministic.
    let target = matches
        .iter()
        .max_by_key(|name| vault.note_count(category_folder, name))
        .map(|name| name.to_string())
        .unwrap_or_else(|| candidate.to_string());

    debug!(
        candidate,
        folder = %target,
        variants = matches.len(),
        "base-name match, consolidating into existing folder"
    );
    target
}
