//! Recency classification for note modification times.
//!
//! Buckets a note's age (days since last modification) against fixed
//! thresholds. The buckets feed the weight calculator and the archive
//! preservation heuristics; both treat them as opaque classes, so the
//! thresholds live here in one place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Age bucket of a note relative to its last modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecencyBucket {
    /// Modified within the last 7 days.
    VeryRecent,
    /// Modified within the last 30 days.
    Recent,
    /// Modified within the last 90 days.
    Moderate,
    /// Untouched for more than 90 days.
    Old,
}

impl RecencyBucket {
    /// Classify an age in days.
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d <= 7 => Self::VeryRecent,
            d if d <= 30 => Self::Recent,
            d if d <= 90 => Self::Moderate,
            _ => Self::Old,
        }
    }

    /// Classify a modification timestamp against `now`.
    pub fn from_modified(last_modified: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_days((now - last_modified).num_days())
    }
}

impl std::fmt::Display for RecencyBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VeryRecent => write!(f, "very_recent"),
            Self::Recent => write!(f, "recent"),
            Self::Moderate => write!(f, "moderate"),
            Self::Old => write!(f, "old"),
        }
    }
}
