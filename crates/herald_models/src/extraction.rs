//! Utilities for pulling a post out of free-form model output.
//!
//! Models wrap JSON in markdown fences, add chatty preambles, or ignore the
//! requested format and write `Title:` / `Content:` markers instead. The
//! functions here handle each of those shapes; none of them fail, they
//! return `None` when nothing usable is found.

use regex::Regex;
use std::sync::LazyLock;

static TITLE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[\s*#_]*title[\s*_]*:[\s*_]*(?P<title>.+?)[\s*_]*$")
        .expect("Valid title regex")
});

static CONTENT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ims)^[\s*#_]*(?:content|body)[\s*_]*:[ \t*_]*(?P<content>.+)\z")
        .expect("Valid content regex")
});

/// Remove a surrounding markdown code fence, if there is one.
///
/// Handles fences with or without a language tag, and a missing closing
/// fence (truncated responses). Text without a fence is returned trimmed.
///
/// # Examples
///
/// ```
/// use herald_models::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_code_fences("  plain  "), "plain");
/// ```
pub fn strip_code_fences(response: &str) -> &str {
    let Some(start) = response.find("```") else {
        return response.trim();
    };

    let after_fence = &response[start + 3..];
    // Skip the language tag line, if any
    let body = match after_fence.find('\n') {
        Some(newline) if !after_fence[..newline].contains('{') => &after_fence[newline + 1..],
        _ => after_fence,
    };

    match body.find("```") {
        Some(end) => body[..end].trim(),
        // No closing fence found - likely truncated response
        None => body.trim(),
    }
}

/// Find the first balanced JSON object in `response`.
///
/// Code fences are stripped first. String literals are tracked so braces
/// inside them do not affect nesting.
///
/// ```
/// use herald_models::extract_json_object;
///
/// let text = "Sure! Here it is: {\"title\": \"T\", \"content\": \"a {b}\"} Enjoy.";
/// assert_eq!(
///     extract_json_object(text),
///     Some("{\"title\": \"T\", \"content\": \"a {b}\"}")
/// );
/// assert_eq!(extract_json_object("no json here"), None);
/// ```
pub fn extract_json_object(response: &str) -> Option<&str> {
    let text = strip_code_fences(response);
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Extract `Title:` and `Content:` marker values from free text.
///
/// Markers are matched case-insensitively and may be decorated with
/// markdown emphasis or heading marks. Content runs to the end of the text.
/// Returns `None` only when neither marker is present.
///
/// ```
/// use herald_models::extract_marked_fields;
///
/// let (title, content) =
///     extract_marked_fields("**Title:** Small wins\n\nContent: Start with one habit.").unwrap();
/// assert_eq!(title.as_deref(), Some("Small wins"));
/// assert_eq!(content.as_deref(), Some("Start with one habit."));
/// ```
pub fn extract_marked_fields(response: &str) -> Option<(Option<String>, Option<String>)> {
    let text = strip_code_fences(response);

    let title = TITLE_MARKER
        .captures(text)
        .map(|c| clean_marker_value(&c["title"]))
        .filter(|t| !t.is_empty());
    let content = CONTENT_MARKER
        .captures(text)
        .map(|c| c["content"].trim().to_string())
        .filter(|c| !c.is_empty());

    if title.is_none() && content.is_none() {
        return None;
    }
    Some((title, content))
}

fn clean_marker_value(value: &str) -> String {
    value
        .trim()
        .trim_matches(|c| c == '"' || c == '*' || c == '_')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fence_without_language() {
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_fence_truncated() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1"), "{\"a\": 1");
    }

    #[test]
    fn test_strip_single_line_fence() {
        assert_eq!(strip_code_fences("```{\"a\": 1}```"), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_nested_object() {
        let text = r#"{"title": "T", "meta": {"k": "v"}, "content": "C"} trailing"#;
        let json = extract_json_object(text).unwrap();
        assert!(json.ends_with("\"C\"}"));
    }

    #[test]
    fn test_extract_object_with_escaped_quotes() {
        let text = r#"{"title": "She said \"hi\" {not a brace}", "content": "C"}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_unbalanced_object_is_none() {
        assert_eq!(extract_json_object(r#"{"title": "T""#), None);
    }

    #[test]
    fn test_markers_multiline_content() {
        let text = "Title: Breathing room\nContent: First line.\n\nSecond paragraph.";
        let (title, content) = extract_marked_fields(text).unwrap();
        assert_eq!(title.as_deref(), Some("Breathing room"));
        assert_eq!(content.as_deref(), Some("First line.\n\nSecond paragraph."));
    }

    #[test]
    fn test_markers_title_only() {
        let (title, content) = extract_marked_fields("## Title: Just a title").unwrap();
        assert_eq!(title.as_deref(), Some("Just a title"));
        assert!(content.is_none());
    }

    #[test]
    fn test_no_markers_is_none() {
        assert!(extract_marked_fields("I'm sorry, I can't help with that.").is_none());
    }
}
