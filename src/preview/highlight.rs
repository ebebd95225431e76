//! Search highlighting of the rendered preview tree
//!
//! Every pass starts by unwrapping the markers left by the previous pass, so
//! passes never nest markers or duplicate text and no state is carried from
//! one pass to the next. The walk then splits matching text leaves into
//! plain and marker fragments, skipping excluded subtrees (see
//! [`classify_node`]).
//!
//! Matching is per text leaf: a query split across two leaves (for example
//! by emphasis) is not found.
//!
//! A failure on one node is logged and that node is left as it was; the rest
//! of the tree is still highlighted.

use crate::preview::classify::{classify_node, NodeClass};
use crate::preview::node::Node;
use crate::primitives::offset_index::find_matches;

/// Nesting depth at which the walk gives up on a subtree
pub const MAX_WALK_DEPTH: usize = 256;

#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    #[error("preview nesting deeper than {limit} levels under <{tag}>")]
    TooDeep { limit: usize, tag: String },
    #[error("match {start}..{end} lies outside a {len}-char text node")]
    InvalidSplit { start: usize, end: usize, len: usize },
}

/// What a highlight pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightReport {
    /// Markers removed by the unwrap pass
    pub unwrapped: usize,
    /// Markers inserted by the walk
    pub marks: usize,
    /// Nodes left untouched because processing them failed
    pub skipped: usize,
}

/// Highlight every occurrence of `query` in `root`.
///
/// Always removes the previous pass's markers first; a blank query therefore
/// just clears the highlights.
pub fn highlight_preview(root: &mut Node, query: &str, case_sensitive: bool) -> HighlightReport {
    let mut report = HighlightReport {
        unwrapped: clear_highlights(root),
        ..HighlightReport::default()
    };

    if query.trim().is_empty() {
        return report;
    }

    if classify_node(root) != NodeClass::Container {
        tracing::debug!("preview root is not a container, nothing to highlight");
        return report;
    }
    if let Node::Element(el) = root {
        walk_children(&mut el.children, query, case_sensitive, 1, &mut report);
    }

    tracing::debug!(
        query,
        marks = report.marks,
        unwrapped = report.unwrapped,
        skipped = report.skipped,
        "preview highlighted"
    );
    report
}

/// Remove all markers, merging their text back into the surrounding text.
/// Returns the number of markers removed.
pub fn clear_highlights(root: &mut Node) -> usize {
    match root {
        Node::Element(el) => unwrap_markers(&mut el.children),
        _ => 0,
    }
}

fn unwrap_markers(children: &mut Vec<Node>) -> usize {
    let mut here = 0;
    let mut below = 0;
    for child in children.iter_mut() {
        if child.is_marker() {
            *child = Node::Text(child.text_content());
            here += 1;
        } else if let Node::Element(el) = child {
            below += unwrap_markers(&mut el.children);
        }
    }
    if here > 0 {
        merge_adjacent_text(children);
    }
    here + below
}

fn merge_adjacent_text(children: &mut Vec<Node>) {
    let mut merged: Vec<Node> = Vec::with_capacity(children.len());
    for child in children.drain(..) {
        if let (Some(Node::Text(prev)), Node::Text(text)) = (merged.last_mut(), &child) {
            prev.push_str(text);
            continue;
        }
        merged.push(child);
    }
    *children = merged;
}

fn walk_children(
    children: &mut Vec<Node>,
    query: &str,
    case_sensitive: bool,
    depth: usize,
    report: &mut HighlightReport,
) {
    // Work from a snapshot: fragments inserted for one child must not be
    // visited as siblings.
    let snapshot = std::mem::take(children);
    let mut out = Vec::with_capacity(snapshot.len());

    for mut child in snapshot {
        match process_node(&mut child, query, case_sensitive, depth, report) {
            Ok(Some(fragments)) => out.extend(fragments),
            Ok(None) => out.push(child),
            Err(err) => {
                tracing::warn!(%err, "skipping preview node during highlight");
                report.skipped += 1;
                out.push(child);
            }
        }
    }

    *children = out;
}

/// Process one node. `Ok(Some(_))` replaces it with fragments, `Ok(None)`
/// keeps it (possibly modified in place).
fn process_node(
    node: &mut Node,
    query: &str,
    case_sensitive: bool,
    depth: usize,
    report: &mut HighlightReport,
) -> Result<Option<Vec<Node>>, HighlightError> {
    match classify_node(node) {
        NodeClass::ExcludedSubtree => Ok(None),
        NodeClass::Text => {
            let Node::Text(text) = node else {
                return Ok(None);
            };
            let fragments = split_text(text, query, case_sensitive)?;
            if let Some(fragments) = &fragments {
                report.marks += fragments.iter().filter(|f| f.is_marker()).count();
            }
            Ok(fragments)
        }
        NodeClass::Container => {
            let Node::Element(el) = node else {
                return Ok(None);
            };
            if depth >= MAX_WALK_DEPTH {
                return Err(HighlightError::TooDeep {
                    limit: MAX_WALK_DEPTH,
                    tag: el.tag.clone(),
                });
            }
            walk_children(&mut el.children, query, case_sensitive, depth + 1, report);
            Ok(None)
        }
    }
}

/// Split a text leaf around its matches, or `None` when nothing matches
fn split_text(
    text: &str,
    query: &str,
    case_sensitive: bool,
) -> Result<Option<Vec<Node>>, HighlightError> {
    let spans = find_matches(text, query, case_sensitive);
    if spans.is_empty() {
        return Ok(None);
    }

    let mut fragments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut bytes = ByteCursor::new(text);
    let mut cursor = 0;
    for span in spans {
        let (Some(start), Some(end)) = (bytes.seek(span.start), bytes.seek(span.end)) else {
            return Err(HighlightError::InvalidSplit {
                start: span.start,
                end: span.end,
                len: text.chars().count(),
            });
        };

        if start > cursor {
            fragments.push(Node::text(&text[cursor..start]));
        }
        fragments.push(Node::marker(&text[start..end]));
        cursor = end;
    }
    if cursor < text.len() {
        fragments.push(Node::text(&text[cursor..]));
    }

    Ok(Some(fragments))
}

/// Maps ascending char offsets to byte offsets in one pass over the text
struct ByteCursor<'a> {
    chars: std::str::Chars<'a>,
    char_pos: usize,
    byte_pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
            char_pos: 0,
            byte_pos: 0,
        }
    }

    /// Byte offset of char `target`, or `None` past the end or behind the
    /// previous seek.
    fn seek(&mut self, target: usize) -> Option<usize> {
        if target < self.char_pos {
            return None;
        }
        while self.char_pos < target {
            let ch = self.chars.next()?;
            self.byte_pos += ch.len_utf8();
            self.char_pos += 1;
        }
        Some(self.byte_pos)
    }
}
