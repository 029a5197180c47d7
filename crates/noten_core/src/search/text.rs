//! Text helpers shared by search: notes flattening, case-insensitive lookup
//! and snippet windows.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters kept on each side of a match inside a snippet.
pub const SNIPPET_CONTEXT_CHARS: usize = 28;
/// Length of the fallback snippet when no match position is known.
pub const SNIPPET_FALLBACK_CHARS: usize = 100;

const ELLIPSIS: char = '…';

static CONTROL_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\\[a-z]+\d* ?").expect("valid control word regex"));
static BRACES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[{}]").expect("valid braces regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Flattens the formatted notes blob to searchable plain text.
///
/// Strips backslash control words (with optional numeric argument and one
/// trailing space), removes braces, collapses whitespace runs and trims.
pub fn flatten_notes(blob: &str) -> String {
    if blob.trim().is_empty() {
        return String::new();
    }

    let without_controls = CONTROL_WORD_RE.replace_all(blob, " ");
    let without_braces = BRACES_RE.replace_all(&without_controls, " ");
    let collapsed = WHITESPACE_RE.replace_all(&without_braces, " ");
    collapsed.trim().to_string()
}

/// Finds the first case-insensitive occurrence of `needle` in `haystack`.
///
/// Returns the match as a `[start, end)` range of char indices.
pub fn find_ignore_case(haystack: &[char], needle: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return None;
    }

    (0..haystack.len()).find_map(|start| match_at(haystack, start, &needle).map(|end| (start, end)))
}

/// Whether `haystack` (non-blank) contains `needle` ignoring case.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if haystack.trim().is_empty() {
        return false;
    }
    let chars: Vec<char> = haystack.chars().collect();
    find_ignore_case(&chars, needle).is_some()
}

/// Builds a snippet centred on the first match of `query` in `text`.
pub fn snippet(text: &str, query: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let Some((match_start, match_end)) = find_ignore_case(&chars, query) else {
        return chars.iter().take(SNIPPET_FALLBACK_CHARS).collect();
    };

    let start = match_start.saturating_sub(SNIPPET_CONTEXT_CHARS);
    let end = (match_end + SNIPPET_CONTEXT_CHARS).min(chars.len());
    let window: String = chars[start..end].iter().collect();

    let mut result = String::with_capacity(window.len() + 2 * ELLIPSIS.len_utf8());
    if start > 0 {
        result.push(ELLIPSIS);
    }
    result.push_str(window.trim());
    if end < chars.len() {
        result.push(ELLIPSIS);
    }
    result
}

// Returns the exclusive end index when `needle` matches starting at `start`.
// A haystack char whose lowercase form is only partly consumed is no match.
fn match_at(haystack: &[char], start: usize, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, ch) in haystack[start..].iter().enumerate() {
        for lower in ch.to_lowercase() {
            if matched == needle.len() || needle[matched] != lower {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(start + offset + 1);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{contains_ignore_case, find_ignore_case, flatten_notes, snippet};

    #[test]
    fn flatten_strips_control_words_and_braces() {
        let flat = flatten_notes("{\\rtf1\\ansi\\deff0 {\\fonttbl {\\f0 Segoe UI;}}\\f0\\fs22 This is   alpha\\par note}");
        assert_eq!(flat, "Segoe UI; This is alpha note");
    }

    #[test]
    fn flatten_of_blank_blob_is_empty() {
        assert_eq!(flatten_notes("   "), "");
    }

    #[test]
    fn find_ignores_case() {
        let chars: Vec<char> = "Say HeLLo there".chars().collect();
        assert_eq!(find_ignore_case(&chars, "hello"), Some((4, 9)));
        assert_eq!(find_ignore_case(&chars, "bye"), None);
    }

    #[test]
    fn contains_rejects_blank_haystack() {
        assert!(!contains_ignore_case("   ", " "));
        assert!(contains_ignore_case("Buy Bananas", "bANANA"));
    }

    #[test]
    fn short_text_snippet_has_no_ellipsis() {
        assert_eq!(snippet("alpha beta", "beta"), "alpha beta");
    }

    #[test]
    fn long_text_snippet_is_windowed_with_ellipses() {
        let text = format!("{}needle{}", "a".repeat(40), "b".repeat(40));
        let result = snippet(&text, "NEEDLE");
        assert_eq!(result, format!("…{}needle{}…", "a".repeat(28), "b".repeat(28)));
    }

    #[test]
    fn snippet_without_match_falls_back_to_prefix() {
        let text = "x".repeat(150);
        assert_eq!(snippet(&text, "zzz").chars().count(), 100);
    }
}
