//! Collaborator traits the decision engine consumes.
//!
//! The vector database, the language model, and the vault folder layout are
//! external systems; the engine talks to each through one narrow trait and
//! never reaches around it.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One nearest-neighbor result from the vector search collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Category label the neighbor note was indexed under (free-form; the
    /// suggester normalizes it).
    pub category: String,
    /// Distance to the query text. Smaller is closer; must be ≥ 0.
    pub distance: f32,
}

impl Neighbor {
    pub fn new(category: impl Into<String>, distance: f32) -> Self {
        Self {
            category: category.into(),
            distance: distance.max(0.0),
        }
    }
}

/// Vector search collaborator: given note text, return up to `k` neighbors
/// with category labels and distances.
///
/// An empty result is a valid response. Implementations must not panic from
/// the engine's perspective; failures surface as `Error::Search`.
#[async_trait]
pub trait VectorSearch: Send + Sync {
    async fn search_neighbors(&self, text: &str, k: usize) -> Result<Vec<Neighbor>>;

    /// Total number of notes currently indexed. Drives the corpus-size
    /// weight factor.
    async fn corpus_size(&self) -> Result<usize>;
}

/// Language model collaborator: given a system prompt and a user prompt,
/// return text, synchronously from the caller's perspective, within the
/// given timeout.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn complete(&self, system: &str, user: &str, timeout_secs: u64) -> Result<String>;
}

/// Vault folder enumerator, used by the folder namer and the duplicate
/// resolver to avoid producing collisions.
///
/// `category_folder` is a numbered vault folder name such as `01-Projects`.
pub trait VaultFolders: Send + Sync {
    /// Names of the subfolders directly under a category folder.
    fn list_subfolders(&self, category_folder: &str) -> BTreeSet<String>;

    /// Names of the note files inside one subfolder.
    fn list_notes(&self, category_folder: &str, folder: &str) -> Vec<String>;

    /// Number of notes inside one subfolder.
    fn note_count(&self, category_folder: &str, folder: &str) -> usize {
        self.list_notes(category_folder, folder).len()
    }

    /// Contents of one note, when readable. Used only by the consolidation
    /// resolver's distinct-project check.
    fn read_note(&self, category_folder: &str, folder: &str, note: &str) -> Option<String>;

    /// Last modification time of one note, when the backing store tracks
    /// it. Drives the temporal-proximity score; `None` simply skips it.
    fn note_modified(
        &self,
        _category_folder: &str,
        _folder: &str,
        _note: &str,
    ) -> Option<chrono::DateTime<chrono::Utc>> {
        None
    }
}
