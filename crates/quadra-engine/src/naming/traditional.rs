//! Title-extraction naming strategy.

use once_cell::sync::Lazy;
use regex::Regex;

use quadra_core::defaults;

static FRONTMATTER_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)\A---\r?\n(.*?)\r?\n---"#).expect("valid frontmatter regex")
});
static TITLE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?im)^title:\s*["']?([^"'\r\n]+)["']?\s*$"#).expect("valid title line regex")
});
static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").expect("valid hashtag regex"));
static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]").expect("valid bracket regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Extract the most appropriate title from note content.
///
/// Priority: frontmatter `title:`, first markdown H1, first H2 (within the
/// first 15 lines), then the first substantive content line. Falls back to
/// [`defaults::FALLBACK_TITLE`].
pub fn extract_title(content: &str) -> String {
    let mut body = content;
    if let Some(frontmatter) = FRONTMATTER_TITLE.captures(content) {
        if let Some(title) = TITLE_LINE.captures(&frontmatter[1]) {
            let title = title[1].trim();
            if !title.is_empty() {
                return title.to_string();
            }
        }
        // Headings and prose are searched below the frontmatter block.
        body = &content[frontmatter.get(0).map(|m| m.end()).unwrap_or(0)..];
    }

    let lines: Vec<&str> = body.lines().collect();

    for line in lines.iter().take(15) {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("# ") {
            if !rest.trim().is_empty() {
                return rest.trim().to_string();
            }
        }
    }
    for line in lines.iter().take(15) {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("## ") {
            if !rest.trim().is_empty() {
                return rest.trim().to_string();
            }
        }
    }

    for line in &lines {
        let line = line.trim();
        if !line.is_empty()
            && !line.starts_with("---")
            && !line.starts_with('#')
            && !line.starts_with('!')
            && line.len() > 3
        {
            return line.to_string();
        }
    }

    defaults::FALLBACK_TITLE.to_string()
}

/// Normalize a title into a filesystem-friendly folder name.
///
/// Strips hashtags and markdown link syntax, keeps word characters, spaces,
/// hyphens and Spanish accented letters, collapses whitespace, title-cases,
/// and truncates to whole words under [`defaults::MAX_FOLDER_NAME_LEN`]
/// characters. Returns an empty string when nothing usable remains.
pub fn normalize_title(title: &str) -> String {
    if title.is_empty() {
        return String::new();
    }

    let stripped = HASHTAG.replace_all(title, "");
    let stripped = BRACKETED.replace_all(&stripped, "$1");
    let kept: String = stripped
        .chars()
        .filter(|c| {
            c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_'
        })
        .collect();

    let collapsed = WHITESPACE.replace_all(kept.trim(), " ").to_string();
    let cased = title_case(&collapsed);
    let truncated = truncate_to_words(&cased, defaults::MAX_FOLDER_NAME_LEN);

    if truncated.trim().len() < 2 {
        String::new()
    } else {
        truncated.trim().to_string()
    }
}

/// Title-case each whitespace-separated word.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to whole words within `max_len` characters. When the result
/// would be shorter than 10 characters, keep at least the first two words.
fn truncate_to_words(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut result = String::new();
    for word in &words {
        let candidate_len = if result.is_empty() {
            word.chars().count()
        } else {
            result.chars().count() + 1 + word.chars().count()
        };
        if candidate_len <= max_len {
            if !result.is_empty() {
                result.push(' ');
            }
            result.push_str(word);
        } else {
            break;
        }
    }
    if result.chars().count() < 10 && words.len() >= 2 {
        result = words[..2].join(" ");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontmatter_title_wins() {
        let content = "---\ntitle: \"Migration Plan\"\ntags: [a]\n---\n# Different Heading\nbody";
        assert_eq!(extract_title(content), "Migration Plan");
    }

    #[test]
    fn test_h1_preferred_over_h2() {
        let content = "## Secondary\n# Primary Heading\nbody";
        assert_eq!(extract_title(content), "Primary Heading");
    }

    #[test]
    fn test_h2_when_no_h1() {
        let content = "## Secondary Heading\nbody";
        assert_eq!(extract_title(content), "Secondary Heading");
    }

    #[test]
    fn test_first_substantive_line() {
        let content = "---\nkey: v\n---\n\n![image](x.png)\nActual first line of prose here";
        assert_eq!(extract_title(content), "Actual first line of prose here");
    }

    #[test]
    fn test_fallback_title() {
        assert_eq!(extract_title(""), "Sin Título");
        assert_eq!(extract_title("!\n#\nab"), "Sin Título");
    }

    #[test]
    fn test_normalize_strips_hashtags_and_links() {
        assert_eq!(
            normalize_title("Review #urgent [[linked note]] docs"),
            "Review Linked Note Docs"
        );
    }

    #[test]
    fn test_normalize_keeps_accented_letters() {
        assert_eq!(normalize_title("reunión de planificación"), "Reunión De Planificación");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_title("too    many\tspaces"), "Too Many Spaces");
    }

    #[test]
    fn test_normalize_truncates_to_whole_words() {
        let long = "a very long folder name that would exceed the forty character limit easily";
        let normalized = normalize_title(long);
        assert!(normalized.chars().count() <= 40);
        assert!(!normalized.ends_with(' '));
        // No word is cut in half.
        assert!(long.to_lowercase().contains(
            normalized
                .split_whitespace()
                .last()
                .unwrap()
                .to_lowercase()
                .as_str()
        ));
    }

    #[test]
    fn test_normalize_rejects_unusable_titles() {
        assert_eq!(normalize_title("!"), "");
        assert_eq!(normalize_title(""), "");
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let title = "Proyecto Compass  — fase 2 #wip";
        assert_eq!(normalize_title(title), normalize_title(title));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hello WORLD foo"), "Hello World Foo");
    }
}
