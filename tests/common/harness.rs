// EditorTestHarness - drives a NoteEditor with a recording surface and a manual clock

use notesift::app::{NoteEditor, ViewMode};
use notesift::config::Config;
use notesift::model::span::{LineColumn, MatchSpan};
use notesift::primitives::timer::ManualClock;
use notesift::search::Tick;
use notesift::view::overlay::OverlayFrame;
use notesift::view::surface::{SurfaceUpdate, TextSurface};

/// Time between simulated keystrokes in the search box
pub const KEYSTROKE_INTERVAL_MS: u64 = 50;

/// Editing surface that records every update it is asked to apply
#[derive(Debug, Default)]
pub struct FakeSurface {
    pub updates: Vec<SurfaceUpdate>,
}

impl TextSurface for FakeSurface {
    fn apply(&mut self, update: SurfaceUpdate) {
        self.updates.push(update);
    }
}

pub struct EditorTestHarness {
    editor: NoteEditor<FakeSurface, ManualClock>,
    clock: ManualClock,
}

impl EditorTestHarness {
    /// Open `text` in an editor with a mounted surface and default config
    pub fn new(text: &str) -> Self {
        Self::with_config(text, Config::default())
    }

    pub fn with_config(text: &str, config: Config) -> Self {
        let clock = ManualClock::new();
        let mut editor = NoteEditor::with_clock(&config, text, clock.clone());
        editor.mount(FakeSurface::default());
        Self { editor, clock }
    }

    pub fn editor(&self) -> &NoteEditor<FakeSurface, ManualClock> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut NoteEditor<FakeSurface, ManualClock> {
        &mut self.editor
    }

    /// Type `query` into the search box one char at a time, polling timers
    /// between keystrokes like the host loop would.
    pub fn type_query(&mut self, query: &str) {
        let mut typed = String::new();
        for ch in query.chars() {
            typed.push(ch);
            self.editor.search_input(&typed);
            self.advance(KEYSTROKE_INTERVAL_MS);
        }
    }

    /// Type `query` and press enter
    pub fn search(&mut self, query: &str) -> Option<MatchSpan> {
        self.type_query(query);
        self.editor.search_submit()
    }

    /// Move the clock forward and poll once
    pub fn advance(&mut self, ms: u64) -> Tick {
        self.clock.advance_ms(ms);
        self.editor.tick()
    }

    /// Poll until no timer is pending
    pub fn settle(&mut self) {
        for _ in 0..10 {
            let search = self.editor.search();
            if !search.is_debouncing() && !search.is_settling() {
                return;
            }
            self.advance(100);
        }
        panic!("timers still pending after 1s of simulated time");
    }

    pub fn surface_updates(&self) -> &[SurfaceUpdate] {
        self.editor
            .surface()
            .surface()
            .map(|s| s.updates.as_slice())
            .unwrap_or_default()
    }

    pub fn last_update(&self) -> Option<&SurfaceUpdate> {
        self.surface_updates().last()
    }

    pub fn overlay(&self) -> Option<OverlayFrame> {
        self.editor.overlay_frame()
    }

    pub fn cursor(&self) -> LineColumn {
        self.editor.cursor()
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.editor.set_mode(mode);
    }

    pub fn preview_html(&self) -> String {
        self.editor.preview_html().unwrap_or_default()
    }

    pub fn assert_status(&self, expected: Option<&str>) {
        assert_eq!(
            self.editor.status_message().as_deref(),
            expected,
            "unexpected status message"
        );
    }
}
