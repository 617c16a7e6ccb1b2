//! Folder name generation.
//!
//! Two interchangeable strategies produce a candidate name from note
//! content; both then pass through uniqueness resolution against the
//! vault's existing folders, which consolidates instead of minting
//! numeric-suffix siblings.

pub mod intelligent;
pub mod traditional;
pub mod unique;

use quadra_core::{Category, VaultFolders};
use tracing::debug;

pub use intelligent::{IntelligentNamer, NameParts};
pub use traditional::{extract_title, normalize_title};
pub use unique::{normalize_for_comparison, resolve_unique};

/// Which naming strategy the caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingStrategy {
    /// Entity/theme/template-based names.
    #[default]
    Intelligent,
    /// Title extraction from frontmatter and headings.
    Traditional,
}

/// Derives a human-readable, length-bounded, collision-free folder name.
#[derive(Debug, Clone, Default)]
pub struct FolderNamer {
    strategy: NamingStrategy,
    intelligent: IntelligentNamer,
}

impl FolderNamer {
    pub fn new(strategy: NamingStrategy) -> Self {
        Self {
            strategy,
            intelligent: IntelligentNamer::default(),
        }
    }

    /// Use a customized intelligent namer (extra known clients etc.).
    pub fn with_intelligent(mut self, namer: IntelligentNamer) -> Self {
        self.intelligent = namer;
        self
    }

    /// Generate a folder name for note content destined for `category`,
    /// resolving collisions against the folders already in the vault.
    ///
    /// Deterministic: identical `(content, category, existing folders)`
    /// always yields the identical name.
    pub fn name(&self, content: &str, category: Category, vault: &dyn VaultFolders) -> String {
        let candidate = match self.strategy {
            NamingStrategy::Intelligent => {
                let name = self.intelligent.name(content, category);
                if name.is_empty() {
                    normalize_title(&extract_title(content))
                } else {
                    name
                }
            }
            NamingStrategy::Traditional => normalize_title(&extract_title(content)),
        };

        let candidate = if candidate.is_empty() {
            // Category-derived fallback, as a last resort.
            format!("Nuevo {}", category)
        } else {
            candidate
        };

        let resolved = resolve_unique(&candidate, category.vault_folder(), vault);
        debug!(folder = %resolved, category = %category, "folder name generated");
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::MemoryVault;

    #[test]
    fn test_traditional_strategy_uses_title() {
        let vault = MemoryVault::new();
        let namer = FolderNamer::new(NamingStrategy::Traditional);
        let name = namer.name("# Quarterly Budget Review\n\nnumbers...", Category::Areas, &vault);
        assert_eq!(name, "Quarterly Budget Review");
    }

    #[test]
    fn test_empty_content_falls_back_to_category_name() {
        let vault = MemoryVault::new();
        let namer = FolderNamer::new(NamingStrategy::Traditional);
        let name = namer.name("", Category::Projects, &vault);
        assert_eq!(name, "Sin Título");
    }

    #[test]
    fn test_collision_consolidates_into_existing_folder() {
        let mut vault = MemoryVault::new();
        vault.add_folder("02-Areas", "Team Sync");
        vault.add_note("02-Areas", "Team Sync", "standup.md", "");

        let namer = FolderNamer::new(NamingStrategy::Traditional);
        let name = namer.name("# Team Sync\n\nweekly notes", Category::Areas, &vault);
        assert_eq!(name, "Team Sync");
    }

    #[test]
    fn test_naming_is_deterministic() {
        let vault = MemoryVault::new();
        let namer = FolderNamer::new(NamingStrategy::Intelligent);
        let content = "Docker deployment research for the platform migration";
        let a = namer.name(content, Category::Resources, &vault);
        let b = namer.name(content, Category::Resources, &vault);
        assert_eq!(a, b);
    }
}
