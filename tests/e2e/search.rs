//! E2E tests for searching the note from the search box

use crate::common::harness::EditorTestHarness;
use notesift::model::span::{LineColumn, MatchSpan};
use notesift::primitives::position::line_start_offset;
use notesift::search::SearchState;

fn numbered_note(target_line: usize) -> String {
    (1..=30)
        .map(|i| {
            if i == target_line {
                "target here".to_string()
            } else {
                format!("row {i}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Typing only searches once the keystrokes pause; navigation then wraps
#[test]
fn test_typing_debounces_then_navigates() {
    let mut harness = EditorTestHarness::new("hello world\nfoo bar\nhello again\nbaz");

    harness.type_query("hello");
    assert!(harness.editor().search().matches().is_empty());
    assert_eq!(harness.editor().search().pending_query(), Some("hello"));
    harness.assert_status(None);

    let tick = harness.advance(250);
    assert!(tick.matches_changed);
    assert_eq!(
        harness.editor().search().matches().spans(),
        &[MatchSpan::new(0, 5), MatchSpan::new(20, 25)]
    );
    harness.assert_status(Some("Match 1 of 2"));
    assert!(harness.surface_updates().is_empty());

    assert_eq!(
        harness.editor_mut().next_match(),
        Some(MatchSpan::new(20, 25))
    );
    let update = harness.last_update().unwrap();
    assert_eq!(update.selection, 20..25);
    assert!(update.focus);
    assert_eq!(update.scroll_top, 0.0);
    assert_eq!(harness.cursor(), LineColumn::new(3, 6));
    harness.assert_status(Some("Match 2 of 2"));

    assert_eq!(harness.editor_mut().next_match(), Some(MatchSpan::new(0, 5)));
    harness.assert_status(Some("Match 1 of 2"));
}

/// Enter searches immediately, without waiting for the debounce
#[test]
fn test_submit_runs_without_debounce() {
    let mut harness = EditorTestHarness::new("one alpha two");
    harness.editor_mut().search_input("alpha");
    assert_eq!(
        harness.editor_mut().search_submit(),
        Some(MatchSpan::new(4, 9))
    );
    assert!(!harness.editor().search().is_debouncing());
    assert_eq!(harness.surface_updates().len(), 1);
}

#[test]
fn test_scroll_keeps_five_lines_above_match() {
    let text = numbered_note(20);
    let mut harness = EditorTestHarness::new(&text);

    harness.search("target").unwrap();

    let update = harness.last_update().unwrap();
    let start = line_start_offset(&text, 20);
    assert_eq!(update.selection, start..start + 6);
    assert_eq!(update.scroll_top, 14.0 * 20.0);
    assert_eq!(harness.cursor(), LineColumn::new(20, 7));
}

#[test]
fn test_scroll_clamps_at_top() {
    let text = numbered_note(3);
    let mut harness = EditorTestHarness::new(&text);
    harness.search("target").unwrap();
    assert_eq!(harness.last_update().unwrap().scroll_top, 0.0);
}

#[test]
fn test_next_and_prev_wrap_around() {
    let mut harness = EditorTestHarness::new("x x x");
    harness.search("x").unwrap();
    harness.assert_status(Some("Match 1 of 3"));

    harness.editor_mut().next_match();
    harness.editor_mut().next_match();
    harness.assert_status(Some("Match 3 of 3"));

    assert_eq!(harness.editor_mut().next_match(), Some(MatchSpan::new(0, 1)));
    harness.assert_status(Some("Match 1 of 3"));

    assert_eq!(harness.editor_mut().prev_match(), Some(MatchSpan::new(4, 5)));
    harness.assert_status(Some("Match 3 of 3"));
}

#[test]
fn test_case_insensitive_by_default() {
    let mut harness = EditorTestHarness::new("Alpha ALPHA alpha");
    harness.search("aLpHa").unwrap();
    assert_eq!(harness.editor().search().matches().len(), 3);
}

#[test]
fn test_no_matches() {
    let mut harness = EditorTestHarness::new("alpha beta");
    assert_eq!(harness.search("zzz"), None);
    harness.assert_status(Some("No matches found for 'zzz'"));
    assert_eq!(harness.editor_mut().next_match(), None);
    assert!(harness.surface_updates().is_empty());
}

/// Switching notes while a keystroke is still debouncing never searches the old note
#[test]
fn test_switch_note_cancels_pending_search() {
    let mut harness = EditorTestHarness::new("alpha alpha");
    harness.type_query("alpha");
    assert!(harness.editor().search().is_debouncing());

    harness.editor_mut().switch_note("another alpha note");
    harness.advance(1_000);

    let search = harness.editor().search();
    assert_eq!(search.state(), SearchState::Idle);
    assert!(search.matches().is_empty());
    assert!(search.matches().is_current_for(harness.editor().buffer()));
    assert!(harness.surface_updates().is_empty());
    harness.assert_status(None);
}

/// The caret of the previous note does not carry over to the next one
#[test]
fn test_switch_note_resets_cursor() {
    let mut harness = EditorTestHarness::new("one\ntwo\nthree alpha");
    harness.search("alpha").unwrap();
    assert_eq!(harness.cursor(), LineColumn::new(3, 12));

    harness.editor_mut().switch_note("short");
    assert_eq!(harness.cursor(), LineColumn::new(1, 1));
    assert_eq!(harness.editor().surface().line_count(), 1);
}

#[test]
fn test_close_search_clears_everything() {
    let mut harness = EditorTestHarness::new("alpha beta alpha");
    harness.search("alpha").unwrap();
    assert_eq!(harness.overlay().unwrap().rects.len(), 2);

    harness.editor_mut().close_search();
    assert!(harness.overlay().unwrap().rects.is_empty());
    assert_eq!(harness.editor().search().state(), SearchState::Idle);
    assert!(!harness.editor().search().is_settling());
    harness.assert_status(None);
}

/// Matches found before an edit are not painted until they are recomputed
#[test]
fn test_edit_suppresses_overlay_until_recomputed() {
    let mut harness = EditorTestHarness::new("alpha");
    harness.search("alpha").unwrap();
    assert_eq!(harness.overlay().unwrap().rects[0].left, 0.0);

    harness.editor_mut().edit("xx alpha");
    assert!(harness.overlay().is_none());

    assert!(harness.advance(300).matches_changed);
    let frame = harness.overlay().unwrap();
    assert_eq!(frame.rects.len(), 1);
    assert_eq!(frame.rects[0].left, 24.0);
}

#[test]
fn test_edit_to_empty_note_ends_search() {
    let mut harness = EditorTestHarness::new("alpha");
    harness.search("alpha").unwrap();
    harness.editor_mut().edit("");
    harness.settle();
    assert_eq!(harness.editor().search().state(), SearchState::Idle);
    harness.assert_status(None);
}

#[test]
fn test_unmounted_surface_is_left_alone() {
    let mut harness = EditorTestHarness::new("one\ntwo alpha");
    assert!(harness.editor_mut().unmount().is_some());

    assert_eq!(harness.search("alpha"), Some(MatchSpan::new(8, 13)));
    assert!(harness.surface_updates().is_empty());
    assert_eq!(harness.cursor(), LineColumn::new(1, 1));
    harness.editor_mut().on_selection_changed(5);
    assert_eq!(harness.cursor(), LineColumn::new(1, 1));
}
