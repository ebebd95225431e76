//! Which parts of the preview tree the highlighter may touch

use crate::preview::node::Node;

/// Elements whose content is never highlighted
const EXCLUDED_TAGS: &[&str] = &["pre", "code", "script", "style", "svg", "img"];

/// Classes marking diagram containers rendered from fenced blocks
const DIAGRAM_CLASSES: &[&str] = &["mermaid", "diagram"];

/// Attribute marking a diagram container regardless of class
const DIAGRAM_ATTR: &str = "data-diagram";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    /// Text leaf, scanned for matches
    Text,
    /// Skipped together with all descendants
    ExcludedSubtree,
    /// Recursed into
    Container,
}

/// Classify a node for the highlight walk.
///
/// Code, diagrams, existing highlight wrappers and raw renderer output are
/// excluded; every other element is a container.
pub fn classify_node(node: &Node) -> NodeClass {
    match node {
        Node::Text(_) => NodeClass::Text,
        Node::Raw(_) => NodeClass::ExcludedSubtree,
        Node::Element(el) => {
            let tag = el.tag.to_ascii_lowercase();
            if EXCLUDED_TAGS.contains(&tag.as_str())
                || node.is_marker()
                || el.attr(DIAGRAM_ATTR).is_some()
                || DIAGRAM_CLASSES.iter().any(|class| el.has_class(class))
            {
                NodeClass::ExcludedSubtree
            } else {
                NodeClass::Container
            }
        }
    }
}
