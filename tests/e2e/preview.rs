//! E2E tests for highlighting the rendered markdown preview

use crate::common::harness::EditorTestHarness;
use notesift::app::ViewMode;
use notesift::preview::{render_markdown, Node};

const NOTE: &str = "# Alpha notes\n\
\n\
Some alpha text.\n\
\n\
```rust\n\
let alpha = 1;\n\
```\n\
\n\
```mermaid\n\
graph TD; alpha-->beta\n\
```\n";

fn markers(harness: &EditorTestHarness) -> usize {
    harness
        .editor()
        .preview()
        .map(Node::count_markers)
        .unwrap_or_default()
}

/// Code blocks and diagrams keep their text unmarked
#[test]
fn test_preview_marks_prose_only() {
    // Initialize tracing
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_test_writer()
        .try_init();

    let mut harness = EditorTestHarness::new(NOTE);
    harness.set_mode(ViewMode::Preview);
    harness.search("alpha");
    harness.settle();

    assert_eq!(markers(&harness), 2);
    assert_eq!(
        harness.preview_html(),
        "<div class=\"markdown-preview\">\
         <h1><mark class=\"search-highlight\">Alpha</mark> notes</h1>\
         <p>Some <mark class=\"search-highlight\">alpha</mark> text.</p>\
         <pre><code class=\"language-rust\">let alpha = 1;\n</code></pre>\
         <div class=\"mermaid\">graph TD; alpha--&gt;beta\n</div>\
         </div>"
    );
}

#[test]
fn test_preview_snapshot() {
    let mut harness = EditorTestHarness::new("An *alpha* and a beta.\n");
    harness.set_mode(ViewMode::Preview);
    harness.search("beta");
    harness.settle();
    insta::assert_snapshot!(harness.preview_html(), @r#"<div class="markdown-preview"><p>An <em>alpha</em> and a <mark class="search-highlight">beta</mark>.</p></div>"#);
}

/// Re-running the highlighter with the same query changes nothing
#[test]
fn test_repeated_passes_are_stable() {
    let mut harness = EditorTestHarness::new(NOTE);
    harness.set_mode(ViewMode::Preview);
    harness.search("alpha");
    harness.settle();
    let first = harness.preview_html();

    harness.editor_mut().search_submit();
    harness.settle();
    assert_eq!(harness.preview_html(), first);
    assert_eq!(markers(&harness), 2);
}

#[test]
fn test_clearing_query_restores_preview() {
    let original = render_markdown(NOTE);
    let mut harness = EditorTestHarness::new(NOTE);
    harness.set_mode(ViewMode::Preview);
    harness.search("alpha");
    harness.settle();

    harness.editor_mut().search_input("");
    harness.settle();
    assert_eq!(markers(&harness), 0);
    assert_eq!(harness.editor().preview(), Some(&original));
}

#[test]
fn test_close_search_unwraps_markers() {
    let mut harness = EditorTestHarness::new(NOTE);
    harness.set_mode(ViewMode::Preview);
    harness.search("alpha");
    harness.settle();
    assert_eq!(markers(&harness), 2);

    harness.editor_mut().close_search();
    assert_eq!(markers(&harness), 0);
    assert!(!harness.preview_html().contains("<mark"));
}

#[test]
fn test_edit_rehighlights_after_settle() {
    let mut harness = EditorTestHarness::new("alpha\n");
    harness.set_mode(ViewMode::Preview);
    harness.search("alpha");
    harness.settle();
    assert_eq!(markers(&harness), 1);

    harness.editor_mut().edit("alpha\n\nmore alpha\n");
    assert_eq!(markers(&harness), 0);
    harness.settle();
    assert_eq!(markers(&harness), 2);
}

/// Entering preview mode highlights right away
#[test]
fn test_entering_preview_highlights_immediately() {
    let mut harness = EditorTestHarness::new("one alpha\n");
    harness.search("alpha");
    harness.settle();
    harness.set_mode(ViewMode::Preview);
    assert_eq!(markers(&harness), 1);

    harness.set_mode(ViewMode::Edit);
    assert!(harness.editor().preview().is_none());
}
