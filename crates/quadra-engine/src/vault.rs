//! Vault folder enumeration: a std::fs implementation and an in-memory
//! implementation for tests.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use tracing::warn;

use quadra_core::VaultFolders;

/// Filesystem-backed vault layout reader.
///
/// Reads one level of structure: `<root>/<category>/<folder>/<note>.md`.
/// All failures degrade to empty results — the namer and resolver treat an
/// unreadable vault as having no folders, never as an error.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl VaultFolders for FsVault {
    fn list_subfolders(&self, category_folder: &str) -> BTreeSet<String> {
        let path = self.root.join(category_folder);
        let Ok(entries) = std::fs::read_dir(&path) else {
            return BTreeSet::new();
        };
        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect()
    }

    fn list_notes(&self, category_folder: &str, folder: &str) -> Vec<String> {
        let path = self.root.join(category_folder).join(folder);
        let Ok(entries) = std::fs::read_dir(&path) else {
            return Vec::new();
        };
        let mut notes: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(".md"))
            .collect();
        notes.sort();
        notes
    }

    fn read_note(&self, category_folder: &str, folder: &str, note: &str) -> Option<String> {
        let path = self.root.join(category_folder).join(folder).join(note);
        match std::fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable note");
                None
            }
        }
    }

    fn note_modified(
        &self,
        category_folder: &str,
        folder: &str,
        note: &str,
    ) -> Option<chrono::DateTime<chrono::Utc>> {
        let path = self.root.join(category_folder).join(folder).join(note);
        let modified = std::fs::metadata(&path).ok()?.modified().ok()?;
        Some(chrono::DateTime::<chrono::Utc>::from(modified))
    }
}

/// In-memory vault layout for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryVault {
    folders: BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>,
    modified: BTreeMap<String, chrono::DateTime<chrono::Utc>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_folder(&mut self, category_folder: &str, folder: &str) {
        self.folders
            .entry(category_folder.to_string())
            .or_default()
            .entry(folder.to_string())
            .or_default();
    }

    pub fn add_note(&mut self, category_folder: &str, folder: &str, note: &str, text: &str) {
        self.folders
            .entry(category_folder.to_string())
            .or_default()
            .entry(folder.to_string())
            .or_default()
            .insert(note.to_string(), text.to_string());
    }

    /// Record a modification time for a note added via [`Self::add_note`].
    pub fn set_modified(
        &mut self,
        category_folder: &str,
        folder: &str,
        note: &str,
        ts: chrono::DateTime<chrono::Utc>,
    ) {
        self.modified
            .insert(format!("{}/{}/{}", category_folder, folder, note), ts);
    }
}

impl VaultFolders for MemoryVault {
    fn list_subfolders(&self, category_folder: &str) -> BTreeSet<String> {
        self.folders
            .get(category_folder)
            .map(|folders| folders.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn list_notes(&self, category_folder: &str, folder: &str) -> Vec<String> {
        self.folders
            .get(category_folder)
            .and_then(|folders| folders.get(folder))
            .map(|notes| notes.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read_note(&self, category_folder: &str, folder: &str, note: &str) -> Option<String> {
        self.folders
            .get(category_folder)?
            .get(folder)?
            .get(note)
            .cloned()
    }

    fn note_modified(
        &self,
        category_folder: &str,
        folder: &str,
        note: &str,
    ) -> Option<chrono::DateTime<chrono::Utc>> {
        self.modified
            .get(&format!("{}/{}/{}", category_folder, folder, note))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_vault_round_trip() {
        let mut vault = MemoryVault::new();
        vault.add_folder("01-Projects", "Alpha");
        vault.add_note("01-Projects", "Alpha", "a.md", "text");

        assert!(vault.list_subfolders("01-Projects").contains("Alpha"));
        assert_eq!(vault.list_notes("01-Projects", "Alpha"), vec!["a.md"]);
        assert_eq!(vault.note_count("01-Projects", "Alpha"), 1);
        assert_eq!(
            vault.read_note("01-Projects", "Alpha", "a.md").as_deref(),
            Some("text")
        );
        assert_eq!(vault.read_note("01-Projects", "Alpha", "b.md"), None);
    }

    #[test]
    fn test_memory_vault_unknown_category_is_empty() {
        let vault = MemoryVault::new();
        assert!(vault.list_subfolders("09-Nothing").is_empty());
        assert!(vault.list_notes("09-Nothing", "X").is_empty());
    }

    #[test]
    fn test_fs_vault_reads_layout() {
        let dir = tempfile::tempdir().unwrap();
        let projects = dir.path().join("01-Projects").join("Alpha");
        std::fs::create_dir_all(&projects).unwrap();
        std::fs::write(projects.join("plan.md"), "# Plan").unwrap();
        std::fs::write(projects.join("ignore.txt"), "not a note").unwrap();

        let vault = FsVault::new(dir.path());
        assert!(vault.list_subfolders("01-Projects").contains("Alpha"));
        assert_eq!(vault.list_notes("01-Projects", "Alpha"), vec!["plan.md"]);
        assert_eq!(
            vault.read_note("01-Projects", "Alpha", "plan.md").as_deref(),
            Some("# Plan")
        );
    }

    #[test]
    fn test_fs_vault_missing_paths_degrade_to_empty() {
        let vault = FsVault::new("/definitely/not/a/real/path");
        assert!(vault.list_subfolders("01-Projects").is_empty());
        assert!(vault.list_notes("01-Projects", "Alpha").is_empty());
        assert!(vault.read_note("01-Projects", "Alpha", "a.md").is_none());
    }
}
