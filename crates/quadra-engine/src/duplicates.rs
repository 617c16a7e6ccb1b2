//! Duplicate and consolidation resolution.
//!
//! Two concerns: automatic file duplicates (numeric/copy suffixes on
//! filenames) and thematic folder duplicates (same normalized base name,
//! different strings). The resolver only *plans* — every filesystem move is
//! executed by the external vault-mutation collaborator.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use quadra_core::VaultFolders;

use crate::naming::normalize_for_comparison;

/// Ordered automatic-duplicate suffix patterns.
static DUPLICATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"_(\d+)$",
        r"(?i)_copy(\d*)$",
        r"\s+\((\d+)\)$",
        r"(?i)\s+copy(\d*)$",
        r"(?i)_duplicate(\d*)$",
        r"(?i)_dup(\d*)$",
        r"(?i)_backup(\d*)$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid duplicate pattern"))
    .collect()
});

/// Result of matching a filename against the duplicate suffix patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMatch {
    pub is_duplicate: bool,
    /// Name with extension and duplicate suffix removed.
    pub base_name: String,
    /// The matched suffix, empty when not a duplicate.
    pub pattern: String,
    /// The numeric part of the suffix, defaulting to "1".
    pub number: String,
}

/// Detect an automatic-duplicate suffix in a file or folder name.
///
/// `Report_2.md` → duplicate of base `Report`; `Report.md` → not a
/// duplicate.
pub fn detect_duplicate_suffix(name: &str) -> DuplicateMatch {
    let stem = name.strip_suffix(".md").unwrap_or(name);

    for pattern in DUPLICATE_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(stem) {
            let matched = captures.get(0).map(|m| m.as_str()).unwrap_or_default();
            let number = captures
                .get(1)
                .map(|m| m.as_str())
                .filter(|n| !n.is_empty())
                .unwrap_or("1");
            let base = pattern.replace(stem, "").to_string();
            return DuplicateMatch {
                is_duplicate: true,
                base_name: base,
                pattern: matched.to_string(),
                number: number.to_string(),
            };
        }
    }

    DuplicateMatch {
        is_duplicate: false,
        base_name: stem.to_string(),
        pattern: String::new(),
        number: String::new(),
    }
}

/// A planned move of one note into the consolidation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMove {
    pub from_folder: String,
    pub file: String,
    /// New filename when the original would collide in the target. Files
    /// are never overwritten.
    pub renamed_to: Option<String>,
}

/// A planned merge of duplicate folders into one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidationPlan {
    pub category_folder: String,
    pub target: String,
    pub sources: Vec<String>,
    pub moves: Vec<FileMove>,
}

/// The resolver's judgment for one group of same-base folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeDecision {
    /// Merge the sources into the target, applying the planned moves.
    Merge(ConsolidationPlan),
    /// The folders share a base name but hold distinct projects; they are
    /// reported, not merged.
    Distinct { folders: Vec<String>, reason: String },
}

static PROJECT_INDICATOR_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(deadline|milestone|deliverable|client|launch|release|sprint|kickoff|scope|budget|stakeholder|roadmap|objective|goal)\b",
    )
    .expect("valid project indicator regex")
});
static PROPER_NOUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]{3,}\b").expect("valid proper noun regex"));

/// Detects duplicate folders and plans their consolidation.
#[derive(Debug, Clone)]
pub struct DuplicateResolver {
    /// Minimum keyword overlap (Jaccard) below which two folders are
    /// treated as distinct projects and never merged.
    pub distinctness_threshold: f32,
}

impl Default for DuplicateResolver {
    fn default() -> Self {
        Self {
            distinctness_threshold: 0.2,
        }
    }
}

impl DuplicateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group the folders of one category by normalized base name and judge
    /// every group with more than one member.
    pub fn resolve_category(
        &self,
        category_folder: &str,
        vault: &dyn VaultFolders,
    ) -> Vec<MergeDecision> {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for folder in vault.list_subfolders(category_folder) {
            groups
                .entry(normalize_for_comparison(&folder))
                .or_default()
                .push(folder);
        }

        let mut decisions = Vec::new();
        for (base, folders) in groups {
            if folders.len() < 2 || base.is_empty() {
                continue;
            }
            decisions.push(self.judge_group(category_folder, &folders, vault));
        }
        decisions
    }

    fn judge_group(
        &self,
        category_folder: &str,
        folders: &[String],
        vault: &dyn VaultFolders,
    ) -> MergeDecision {
        // Folders describing different projects must not be collapsed.
        let keyword_sets: Vec<BTreeSet<String>> = folders
            .iter()
            .map(|folder| folder_indicator_keywords(category_folder, folder, vault))
            .collect();

        for (i, a) in keyword_sets.iter().enumerate() {
            for b in keyword_sets.iter().skip(i + 1) {
                if a.is_empty() || b.is_empty() {
                    continue;
                }
                let overlap = jaccard(a, b);
                if overlap < self.distinctness_threshold {
                    info!(
                        folders = ?folders,
                        overlap,
                        "refusing to merge folders with distinct project vocabularies"
                    );
                    return MergeDecision::Distinct {
                        folders: folders.to_vec(),
                        reason: format!(
                            "project keyword overlap {:.2} below threshold {:.2}",
                            overlap, self.distinctness_threshold
                        ),
                    };
                }
            }
        }

        // Target: the folder with the most notes. BTreeMap grouping keeps
        // tie-breaking deterministic.
        let target = folders
            .iter()
            .max_by_key(|folder| vault.note_count(category_folder, folder))
            .cloned()
            .unwrap_or_else(|| folders[0].clone());

        let mut taken: BTreeSet<String> = vault
            .list_notes(category_folder, &target)
            .into_iter()
            .collect();
        let mut moves = Vec::new();
        let mut sources = Vec::new();

        for folder in folders {
            if *folder == target {
                continue;
            }
            sources.push(folder.clone());
            for file in vault.list_notes(category_folder, folder) {
                let renamed_to = if taken.contains(&file) {
                    Some(next_free_name(&file, &taken))
                } else {
                    None
                };
                taken.insert(renamed_to.clone().unwrap_or_else(|| file.clone()));
                moves.push(FileMove {
                    from_folder: folder.clone(),
                    file,
                    renamed_to,
                });
            }
        }

        debug!(
            target = %target,
            source_count = sources.len(),
            move_count = moves.len(),
            "planned folder consolidation"
        );

        MergeDecision::Merge(ConsolidationPlan {
            category_folder: category_folder.to_string(),
            target,
            sources,
            moves,
        })
    }
}

/// Project-indicator vocabulary of one folder: fixed indicator keywords
/// plus capitalized proper nouns from its notes.
fn folder_indicator_keywords(
    category_folder: &str,
    folder: &str,
    vault: &dyn VaultFolders,
) -> BTreeSet<String> {
    let mut keywords = BTreeSet::new();
    for note in vault.list_notes(category_folder, folder) {
        let Some(text) = vault.read_note(category_folder, folder, &note) else {
            continue;
        };
        for m in PROJECT_INDICATOR_WORDS.find_iter(&text) {
            keywords.insert(m.as_str().to_lowercase());
        }
        for m in PROPER_NOUN.find_iter(&text) {
            keywords.insert(m.as_str().to_lowercase());
        }
    }
    keywords
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f32 {
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        return 1.0;
    }
    intersection as f32 / union as f32
}

/// First `base_N.ext` name not already taken, counting up from 1.
fn next_free_name(file: &str, taken: &BTreeSet<String>) -> String {
    let (stem, ext) = match file.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (file, None),
    };
    let mut n = 1usize;
    loop {
        let candidate = match ext {
            Some(ext) => format!("{}_{}.{}", stem, n, ext),
            None => format!("{}_{}", stem, n),
        };
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
