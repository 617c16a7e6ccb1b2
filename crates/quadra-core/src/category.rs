//! The PARA category model and its single source of truth for vault folders.
//!
//! Every component resolves categories and numbered vault folders through
//! this module. The free-form label normalization here is total: any input
//! string maps to one of the four canonical categories, with unmapped labels
//! defaulting to `Resources` (reference material is the safest bucket).

use serde::{Deserialize, Serialize};

/// Vault folder holding unprocessed notes.
pub const INBOX_FOLDER: &str = "00-Inbox";

/// One of the four canonical PARA categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// A series of tasks linked to a goal with a deadline.
    Projects,
    /// A sphere of activity with a standard to be maintained over time.
    Areas,
    /// A topic of ongoing interest; reference material.
    Resources,
    /// Inactive items kept for the record.
    Archive,
}

impl Category {
    /// All four canonical categories, in vault order.
    pub const ALL: [Category; 4] = [
        Category::Projects,
        Category::Areas,
        Category::Resources,
        Category::Archive,
    ];

    /// Numbered vault folder for this category.
    pub fn vault_folder(&self) -> &'static str {
        match self {
            Category::Projects => "01-Projects",
            Category::Areas => "02-Areas",
            Category::Resources => "03-Resources",
            Category::Archive => "04-Archive",
        }
    }

    /// Resolve a vault path component back to its category.
    ///
    /// Accepts both the numbered folder (`04-Archive`) and the bare name
    /// (`archive`), case-insensitively. `00-Inbox` resolves to `None`.
    pub fn from_folder(component: &str) -> Option<Category> {
        let lower = component.to_lowercase();
        for category in Category::ALL {
            if lower == category.vault_folder().to_lowercase()
                || lower == category.to_string().to_lowercase()
            {
                return Some(category);
            }
        }
        None
    }

    /// Collapse a free-form category label into a canonical category.
    ///
    /// Total and idempotent: canonical labels map to themselves, known
    /// keywords map by containment in registration order, and anything
    /// unrecognized lands in `Resources`.
    pub fn normalize(raw: &str) -> Category {
        let lower = raw.trim().to_lowercase();

        match lower.as_str() {
            "projects" => return Category::Projects,
            "areas" => return Category::Areas,
            "resources" => return Category::Resources,
            "archive" | "archives" => return Category::Archive,
            _ => {}
        }

        for (keyword, category) in LABEL_KEYWORDS {
            if lower.contains(keyword) {
                return *category;
            }
        }

        Category::Resources
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Projects => write!(f, "Projects"),
            Self::Areas => write!(f, "Areas"),
            Self::Resources => write!(f, "Resources"),
            Self::Archive => write!(f, "Archive"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "projects" => Ok(Self::Projects),
            "areas" => Ok(Self::Areas),
            "resources" => Ok(Self::Resources),
            "archive" | "archives" => Ok(Self::Archive),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}

/// Ordered keyword→category table consulted by [`Category::normalize`].
///
/// Matching is by containment, so more specific labels must precede their
/// substrings where the target categories differ.
const LABEL_KEYWORDS: &[(&str, Category)] = &[
    // Projects
    ("project", Category::Projects),
    ("trabajo", Category::Projects),
    ("job", Category::Projects),
    ("client", Category::Projects),
    ("development", Category::Projects),
    ("website", Category::Projects),
    ("task", Category::Projects),
    ("goal", Category::Projects),
    ("objetivo", Category::Projects),
    ("deadline", Category::Projects),
    ("milestone", Category::Projects),
    ("deliverable", Category::Projects),
    ("sprint", Category::Projects),
    // Areas
    ("area", Category::Areas),
    ("coaching", Category::Areas),
    ("health", Category::Areas),
    ("finance", Category::Areas),
    ("personal", Category::Areas),
    ("skill", Category::Areas),
    ("learning", Category::Areas),
    ("habit", Category::Areas),
    ("management", Category::Areas),
    ("lifestyle", Category::Areas),
    ("career", Category::Areas),
    ("fitness", Category::Areas),
    ("routine", Category::Areas),
    // Archive (before the Resources catch-alls: "old notes" should archive)
    ("old", Category::Archive),
    ("backup", Category::Archive),
    ("past", Category::Archive),
    ("completed", Category::Archive),
    ("done", Category::Archive),
    ("archived", Category::Archive),
    ("deprecated", Category::Archive),
    ("obsolete", Category::Archive),
    ("finished", Category::Archive),
    ("legacy", Category::Archive),
    // Resources
    ("resource", Category::Resources),
    ("template", Category::Resources),
    ("api", Category::Resources),
    ("doc", Category::Resources),
    ("guide", Category::Resources),
    ("tutorial", Category::Resources),
    ("reference", Category::Resources),
    ("tip", Category::Resources),
    ("standard", Category::Resources),
    ("configuration", Category::Resources),
    ("configuración", Category::Resources),
    ("setup", Category::Resources),
    ("note", Category::Resources),
    ("info", Category::Resources),
    ("knowledge", Category::Resources),
    ("collection", Category::Resources),
    ("database", Category::Resources),
    ("vault", Category::Resources),
    ("security", Category::Resources),
    ("privacy", Category::Resources),
    ("research", Category::Resources),
    ("study", Category::Resources),
    ("book", Category::Resources),
    ("article", Category::Resources),
    ("recipe", Category::Resources),
    ("prompt", Category::Resources),
    ("cheat sheet", Category::Resources),
    ("howto", Category::Resources),
    ("manual", Category::Resources),
    ("list", Category::Resources),
    ("misc", Category::Resources),
    ("other", Category::Resources),
    ("general", Category::Resources),
    ("unknown", Category::Resources),
];
