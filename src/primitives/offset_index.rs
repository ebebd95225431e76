//! Literal substring matching
//!
//! Matches are reported as char spans, scanned greedily left to right with
//! no overlap: after a hit at `start` the scan resumes at `start + query_len`.

use crate::model::span::MatchSpan;

/// Fold a char for case-insensitive comparison.
///
/// Chars whose lowercase form is longer than one char are kept as they are,
/// so folded text always has the same char length as the original and spans
/// found in folded text are valid in the original.
pub fn fold_char(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => ch,
    }
}

/// Find every non-overlapping occurrence of `query` in `text`.
///
/// A blank query (empty or whitespace only) matches nothing.
pub fn find_matches(text: &str, query: &str, case_sensitive: bool) -> Vec<MatchSpan> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let fold = |ch: char| if case_sensitive { ch } else { fold_char(ch) };
    let needle: Vec<char> = query.chars().map(fold).collect();
    let haystack: Vec<char> = text.chars().map(fold).collect();
    let len = needle.len();

    let mut spans = Vec::new();
    let mut pos = 0;
    while pos + len <= haystack.len() {
        if haystack[pos] == needle[0] && haystack[pos..pos + len] == needle[..] {
            spans.push(MatchSpan::new(pos, pos + len));
            pos += len;
        } else {
            pos += 1;
        }
    }
    spans
}
