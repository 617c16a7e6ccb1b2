//! Archive preservation policy.
//!
//! A note already sitting in the Archive is usually there for a reason.
//! Before the classifiers get a say, the policy weighs staleness and
//! completion markers against reactivation signals; when the archive side
//! wins, the decision short-circuits to `archive_preservation`. Every
//! threshold is configuration — the day counts are conventions, not
//! requirements.

use quadra_core::{ContentAnalysis, NoteContext};
use tracing::debug;

/// Tunables for the should-stay-archived judgment.
#[derive(Debug, Clone)]
pub struct ArchivePolicy {
    /// Days without modification after which a note counts as stale.
    pub stale_days: i64,
    /// Modifications within this many days count as a reactivation signal.
    pub reactivation_days: i64,
    /// Content shorter than this many characters counts as a stub.
    pub stub_max_len: usize,
    /// More unchecked todos than this counts as a reactivation signal.
    pub pending_todo_threshold: usize,
    /// Words in the text that mark a note completed or obsolete.
    pub completion_markers: Vec<String>,
    /// Filename fragments that mark a note as archival.
    pub filename_markers: Vec<String>,
    /// Words in the text that mark a note as active again.
    pub reactivation_markers: Vec<String>,
}

impl Default for ArchivePolicy {
    fn default() -> Self {
        Self {
            stale_days: 180,
            reactivation_days: 30,
            stub_max_len: 100,
            pending_todo_threshold: 2,
            completion_markers: [
                "completado",
                "finalizado",
                "completed",
                "finished",
                "done",
                "obsoleto",
                "obsolete",
                "deprecated",
                "old",
                "antiguo",
                "viejo",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            filename_markers: ["old", "backup", "archive", "past", "viejo", "antiguo"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            reactivation_markers: [
                "urgent",
                "urgente",
                "important",
                "importante",
                "pending",
                "todo",
                "task",
                "current project",
                "proyecto activo",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl ArchivePolicy {
    /// Decide whether an already-archived note should stay archived.
    ///
    /// Counts archival indicators (staleness, completion markers, archival
    /// filename, stub content) against reactivation indicators (recent
    /// edits, active-language markers, pending-task density); archive wins
    /// on a strict majority. Returns the winning signals for the decision's
    /// reasoning string.
    pub fn should_stay_archived(
        &self,
        ctx: &NoteContext,
        analysis: &ContentAnalysis,
    ) -> Option<Vec<String>> {
        let lower_text = ctx.text.to_lowercase();
        let lower_name = ctx.file_stem().to_lowercase();
        // Unknown modification time reads as very stale, like the original
        // system's fallback.
        let days = analysis.days_since_modified.unwrap_or(365);

        let mut archive_signals = Vec::new();
        if days > self.stale_days {
            archive_signals.push(format!("unmodified for {} days", days));
        }
        if let Some(marker) = self
            .completion_markers
            .iter()
            .find(|m| lower_text.contains(m.as_str()))
        {
            archive_signals.push(format!("completion marker '{}'", marker));
        }
        if let Some(marker) = self
            .filename_markers
            .iter()
            .find(|m| lower_name.contains(m.as_str()))
        {
            archive_signals.push(format!("archival filename marker '{}'", marker));
        }
        if ctx.text.trim().len() < self.stub_max_len {
            archive_signals.push("stub-length content".to_string());
        }

        let mut reactivation_signals = 0usize;
        if days < self.reactivation_days {
            reactivation_signals += 1;
        }
        if self
            .reactivation_markers
            .iter()
            .any(|m| lower_text.contains(m.as_str()))
        {
            reactivation_signals += 1;
        }
        if analysis.pending_todo_count() > self.pending_todo_threshold {
            reactivation_signals += 1;
        }

        debug!(
            archive_signals = archive_signals.len(),
            reactivation_signals, "archive preservation check"
        );

        if archive_signals.len() > reactivation_signals {
            Some(archive_signals)
        } else {
            None
        }
    }
}
