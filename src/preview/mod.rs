//! Rendered markdown preview
//!
//! The preview is a small DOM-like tree ([`node::Node`]) produced from the
//! note's markdown by [`render::render_markdown`]. Search highlighting is
//! applied to that tree in place by [`highlight::highlight_preview`].

pub mod classify;
pub mod highlight;
pub mod node;
pub mod render;

pub use classify::{classify_node, NodeClass};
pub use highlight::{clear_highlights, highlight_preview, HighlightReport};
pub use node::{Element, Node};
pub use render::render_markdown;
