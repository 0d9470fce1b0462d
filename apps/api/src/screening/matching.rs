//! Keyword match engine.
//!
//! Two deliberately different definitions of "occurrence" live side by side
//! here: counting is whole-word (boundaries required on both sides), while
//! context snippets locate the first plain substring hit. Downstream
//! consumers rely on each independently, so the two are not unified.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Marker returned by [`find_context`] when the keyword is absent.
pub const NOT_FOUND_MARKER: &str = "Not found";

/// Characters of surrounding text kept on each side of a context hit.
const CONTEXT_WINDOW_CHARS: usize = 40;

/// Occurrence count for one keyword in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Counts whole-word occurrences of each keyword in `text`.
///
/// Keywords are matched literally (special characters carry no pattern
/// meaning) and independently of each other; duplicates in the input simply
/// recompute the same count. With `case_sensitive` off, the text and every
/// keyword are folded to lowercase before matching. The result keeps the
/// input keyword order.
pub fn compute_matches(
    text: &str,
    keywords: &[String],
    case_sensitive: bool,
) -> Vec<KeywordCount> {
    let folded;
    let haystack = if case_sensitive {
        text
    } else {
        folded = text.to_lowercase();
        &folded
    };

    keywords
        .iter()
        .map(|keyword| {
            let needle = if case_sensitive {
                keyword.clone()
            } else {
                keyword.to_lowercase()
            };
            let pattern = format!(r"\b{}\b", regex::escape(&needle));
            let re = Regex::new(&pattern).unwrap(); // escaped literals always compile
            KeywordCount {
                keyword: keyword.clone(),
                count: re.find_iter(haystack).count(),
            }
        })
        .collect()
}

/// Sum of all per-keyword counts, the score compared against the pass
/// threshold. The comparison is always `score >= threshold`, never `>`.
pub fn aggregate_score(matches: &[KeywordCount]) -> usize {
    matches.iter().map(|m| m.count).sum()
}

/// Extracts a snippet around the first occurrence of `keyword` in `text`,
/// wrapping every occurrence inside the snippet in `[` `]`.
///
/// Unlike counting, this is a plain substring search: "SQL" is found inside
/// "MySQL". The snippet is clamped to at most 40 characters on each side of
/// the first hit and keeps the document's original casing even when matching
/// case-insensitively. Returns the literal "Not found" marker when the
/// keyword does not occur.
pub fn find_context(text: &str, keyword: &str, case_sensitive: bool) -> String {
    if keyword.is_empty() {
        return NOT_FOUND_MARKER.to_string();
    }

    let pattern = if case_sensitive {
        regex::escape(keyword)
    } else {
        format!("(?i){}", regex::escape(keyword))
    };
    let re = Regex::new(&pattern).unwrap(); // escaped literals always compile

    let first = match re.find(text) {
        Some(m) => m,
        None => return NOT_FOUND_MARKER.to_string(),
    };

    let start = step_back(text, first.start(), CONTEXT_WINDOW_CHARS);
    let end = step_forward(text, first.end(), CONTEXT_WINDOW_CHARS);

    re.replace_all(&text[start..end], "[$0]").into_owned()
}

/// Walks back at most `chars` characters from byte offset `from`,
/// staying on char boundaries.
fn step_back(text: &str, from: usize, chars: usize) -> usize {
    let mut pos = from;
    for _ in 0..chars {
        match text[..pos].char_indices().next_back() {
            Some((i, _)) => pos = i,
            None => break,
        }
    }
    pos
}

/// Walks forward at most `chars` characters from byte offset `from`.
fn step_forward(text: &str, from: usize, chars: usize) -> usize {
    match text[from..].char_indices().nth(chars) {
        Some((i, _)) => from + i,
        None => text.len(),
    }
}
