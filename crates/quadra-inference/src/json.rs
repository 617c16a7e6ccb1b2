//! Permissive JSON extraction from LLM responses.
//!
//! Models wrap their answers in code fences, prepend prose, or trail
//! explanations despite instructions not to. Extraction order: strip fence
//! markers, find the first balanced `{...}` object and parse it, then fall
//! back to parsing the whole trimmed response. Anything else is a parse
//! failure the caller treats as "classifier unavailable".

use serde_json::Value;

/// Extract the first JSON object from a raw model response.
pub fn extract_object(raw: &str) -> Option<Value> {
    let stripped = strip_fences(raw);

    if let Some(candidate) = first_balanced_object(&stripped) {
        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
            if value.is_object() {
                return Some(value);
            }
        }
    }

    match serde_json::from_str::<Value>(stripped.trim()) {
        Ok(value) if value.is_object() => Some(value),
        _ => None,
    }
}

/// Remove markdown code-fence markers (```json ... ```), keeping the body.
fn strip_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.contains("```") {
        return trimmed.to_string();
    }
    trimmed
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Locate the first balanced `{...}` span, respecting string literals and
/// escapes. A regex cannot do this; brace counting can.
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        let value = extract_object(r#"{"category": "Projects", "folder_name": "App"}"#).unwrap();
        assert_eq!(value["category"], "Projects");
    }

    #[test]
    fn test_fenced_object() {
        let raw = "```json\n{\"category\": \"Areas\"}\n```";
        let value = extract_object(raw).unwrap();
        assert_eq!(value["category"], "Areas");
    }

    #[test]
    fn test_object_with_surrounding_prose() {
        let raw = "Sure! Here is the classification:\n{\"category\": \"Resources\"}\nHope that helps.";
        let value = extract_object(raw).unwrap();
        assert_eq!(value["category"], "Resources");
    }

    #[test]
    fn test_nested_object() {
        let raw = r#"{"category": "Projects", "detail": {"phase": 2}}"#;
        let value = extract_object(raw).unwrap();
        assert_eq!(value["detail"]["phase"], 2);
    }

    #[test]
    fn test_braces_inside_strings() {
        let raw = r#"{"reasoning": "uses {curly} braces", "category": "Areas"}"#;
        let value = extract_object(raw).unwrap();
        assert_eq!(value["reasoning"], "uses {curly} braces");
    }

    #[test]
    fn test_escaped_quotes_inside_strings() {
        let raw = r#"{"reasoning": "said \"done\"", "category": "Archive"}"#;
        let value = extract_object(raw).unwrap();
        assert_eq!(value["category"], "Archive");
    }

    #[test]
    fn test_takes_first_of_multiple_objects() {
        let raw = r#"{"category": "Projects"} {"category": "Areas"}"#;
        let value = extract_object(raw).unwrap();
        assert_eq!(value["category"], "Projects");
    }

    #[test]
    fn test_no_json_returns_none() {
        assert!(extract_object("I could not classify this note.").is_none());
        assert!(extract_object("").is_none());
    }

    #[test]
    fn test_unbalanced_braces_returns_none() {
        assert!(extract_object(r#"{"category": "Projects""#).is_none());
    }

    #[test]
    fn test_array_is_not_an_object() {
        assert!(extract_object(r#"["Projects", "Areas"]"#).is_none());
    }
}
