//! Historical tag→folder coherence statistics.
//!
//! Tracks where tagged notes have historically been filed. A tag that lands
//! in one folder more than 70 % of the time is a strong placement signal;
//! the weight calculator turns that dominance into its critical
//! tag-coherence boost. The stats are an explicit value owned by the
//! caller, not a singleton.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Tag → (folder → placement count) observations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagFolderStats {
    placements: BTreeMap<String, BTreeMap<String, usize>>,
}

impl TagFolderStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a note carrying `tag` was filed into `folder`.
    pub fn record(&mut self, tag: &str, folder: &str) {
        *self
            .placements
            .entry(tag.to_lowercase())
            .or_default()
            .entry(folder.to_string())
            .or_default() += 1;
    }

    /// Record a whole note's tag set at once.
    pub fn record_note(&mut self, tags: &BTreeSet<String>, folder: &str) {
        for tag in tags {
            self.record(tag, folder);
        }
    }

    /// Share of `tag`'s historical placements that landed in `folder`,
    /// in [0, 1]. Unseen tags score 0.
    pub fn dominance(&self, tag: &str, folder: &str) -> f32 {
        let Some(folders) = self.placements.get(&tag.to_lowercase()) else {
            return 0.0;
        };
        let total: usize = folders.values().sum();
        if total == 0 {
            return 0.0;
        }
        folders.get(folder).copied().unwrap_or(0) as f32 / total as f32
    }

    /// The folder `tag` most often lands in, with its dominance share.
    pub fn dominant_folder(&self, tag: &str) -> Option<(&str, f32)> {
        let folders = self.placements.get(&tag.to_lowercase())?;
        let total: usize = folders.values().sum();
        if total == 0 {
            return None;
        }
        folders
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(folder, count)| (folder.as_str(), *count as f32 / total as f32))
    }

    /// Mean dominance of a tag set against a candidate folder: how well
    /// history supports filing these tags there. Tags never seen before
    /// contribute 0.
    pub fn coherence(&self, tags: &BTreeSet<String>, folder: &str) -> f32 {
        let mut scores = Vec::new();
        for tag in tags {
            if self.placements.contains_key(&tag.to_lowercase()) {
                scores.push(self.dominance(tag, folder));
            }
        }
        if scores.is_empty() {
            return 0.0;
        }
        scores.iter().sum::<f32>() / scores.len() as f32
    }

    /// Highest dominance any of the given tags has toward any folder. This
    /// is what the weight calculator's critical factor thresholds against.
    pub fn max_dominance(&self, tags: &BTreeSet<String>) -> Option<(String, f32)> {
        tags.iter()
            .filter_map(|tag| {
                self.dominant_folder(tag)
                    .map(|(folder, share)| (folder.to_string(), share))
            })
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
