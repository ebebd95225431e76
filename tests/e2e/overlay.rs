//! E2E tests for the highlight overlay above the editing surface

use crate::common::harness::EditorTestHarness;
use notesift::config::{Config, EditorConfig};
use notesift::view::overlay::HighlightFace;

fn boxes(harness: &EditorTestHarness) -> Vec<(f32, f32, f32)> {
    harness
        .overlay()
        .unwrap()
        .rects
        .iter()
        .map(|r| (r.top, r.left, r.width))
        .collect()
}

/// Tabs expand to tab stops and wide chars take two cells
#[test]
fn test_rects_follow_tabs_and_wide_chars() {
    let mut harness = EditorTestHarness::new("ab\tcd alpha\n世界alpha");
    harness.search("alpha").unwrap();

    let frame = harness.overlay().unwrap();
    assert!(!frame.intercepts_input());
    assert_eq!(boxes(&harness), vec![(0.0, 56.0, 40.0), (20.0, 32.0, 40.0)]);
    assert_eq!(frame.rects[0].face, HighlightFace::ActiveMatch);
    assert_eq!(frame.rects[1].face, HighlightFace::Match);
    assert!(frame.rects.iter().all(|r| r.height == 20.0));
}

#[test]
fn test_active_face_follows_navigation() {
    let mut harness = EditorTestHarness::new("alpha alpha");
    harness.search("alpha").unwrap();
    harness.editor_mut().next_match();

    let faces: Vec<_> = harness
        .overlay()
        .unwrap()
        .rects
        .iter()
        .map(|r| r.face)
        .collect();
    assert_eq!(faces, vec![HighlightFace::Match, HighlightFace::ActiveMatch]);
}

/// Every surface scroll event moves the overlay with it
#[test]
fn test_surface_scroll_moves_rects() {
    let mut harness = EditorTestHarness::new("ab\tcd alpha\n世界alpha");
    harness.search("alpha").unwrap();

    harness.editor_mut().on_surface_scroll(10.0, 4.0);
    assert_eq!(boxes(&harness), vec![(-10.0, 52.0, 40.0), (10.0, 28.0, 40.0)]);

    harness.editor_mut().on_surface_scroll(0.0, 0.0);
    assert_eq!(boxes(&harness), vec![(0.0, 56.0, 40.0), (20.0, 32.0, 40.0)]);
}

#[test]
fn test_match_across_newline_gets_one_rect_per_line() {
    let mut harness = EditorTestHarness::new("xa\nby");
    harness.search("a\nb").unwrap();

    let frame = harness.overlay().unwrap();
    assert_eq!(boxes(&harness), vec![(0.0, 8.0, 8.0), (20.0, 0.0, 8.0)]);
    assert!(frame.rects.iter().all(|r| r.match_index == 0));
}

#[test]
fn test_metrics_come_from_config() {
    let config = Config {
        editor: EditorConfig {
            line_height: 16.0,
            char_width: 10.0,
            padding_top: 4.0,
            padding_left: 6.0,
            tab_size: 8,
        },
        ..Config::default()
    };
    let mut harness = EditorTestHarness::with_config("one\n\ttwo", config);
    harness.search("two").unwrap();
    assert_eq!(boxes(&harness), vec![(20.0, 86.0, 30.0)]);
}

#[test]
fn test_overlay_hidden_in_preview_mode() {
    let mut harness = EditorTestHarness::new("alpha");
    harness.search("alpha").unwrap();
    harness.set_mode(notesift::app::ViewMode::Preview);
    assert!(harness.overlay().is_none());
    harness.set_mode(notesift::app::ViewMode::Edit);
    assert_eq!(harness.overlay().unwrap().rects.len(), 1);
}
