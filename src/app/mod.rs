//! One open note
//!
//! [`NoteEditor`] owns the note's current snapshot and routes host events to
//! the surface controller, the overlay renderer, the search session and the
//! preview tree. Every edit produces a new snapshot; nothing downstream ever
//! sees a buffer change underneath it.

pub mod types;

pub use types::ViewMode;

use crate::config::Config;
use crate::model::buffer::TextBuffer;
use crate::model::span::{LineColumn, MatchSpan};
use crate::preview::node::Node;
use crate::preview::render::render_markdown;
use crate::primitives::timer::{Clock, SystemClock};
use crate::search::{SearchSession, Tick};
use crate::view::overlay::{OverlayFrame, OverlayRenderer};
use crate::view::surface::{SurfaceController, TextSurface};
use crate::view::FontMetrics;

pub struct NoteEditor<S: TextSurface, C: Clock = SystemClock> {
    /// Current snapshot of the note
    buffer: TextBuffer,

    mode: ViewMode,

    /// Plain-text editing surface (may be unmounted)
    surface: SurfaceController<S>,

    /// Highlight layer over the editing surface
    overlay: OverlayRenderer,

    search: SearchSession<C>,

    /// Rendered preview, present only in preview mode
    preview: Option<Node>,
}

impl<S: TextSurface> NoteEditor<S, SystemClock> {
    pub fn new(config: &Config, text: &str) -> Self {
        Self::with_clock(config, text, SystemClock)
    }
}

impl<S: TextSurface, C: Clock> NoteEditor<S, C> {
    pub fn with_clock(config: &Config, text: &str, clock: C) -> Self {
        let buffer = TextBuffer::new(text);
        let metrics = FontMetrics::from(&config.editor);
        Self {
            surface: SurfaceController::new(metrics, config.search.context_lines),
            overlay: OverlayRenderer::new(metrics, config.editor.tab_size),
            search: SearchSession::with_clock(buffer.clone(), &config.search, clock),
            buffer,
            mode: ViewMode::Edit,
            preview: None,
        }
    }

    /// Attach the editing surface
    pub fn mount(&mut self, surface: S) {
        self.surface.mount(surface, self.buffer.clone());
    }

    /// Detach the editing surface. Pending search work is dropped with it.
    pub fn unmount(&mut self) -> Option<S> {
        self.search.close(self.preview.as_mut());
        self.surface.unmount()
    }

    /// Replace the note's text
    pub fn edit(&mut self, text: &str) {
        self.buffer = self.buffer.replace(text);
        tracing::trace!(revision = self.buffer.revision(), "note edited");
        self.surface.on_content_changed(self.buffer.clone());
        self.search.on_buffer_changed(self.buffer.clone());
        if self.mode.is_preview() {
            // Markers come back when the settle timer fires
            self.preview = Some(render_markdown(self.buffer.as_str()));
        }
    }

    pub fn on_selection_changed(&mut self, caret: usize) {
        self.surface.on_selection_changed(caret);
    }

    pub fn on_surface_scroll(&mut self, scroll_top: f32, scroll_left: f32) {
        self.overlay.on_surface_scroll(scroll_top, scroll_left);
    }

    /// Query text changed in the search box
    pub fn search_input(&mut self, query: &str) {
        self.search.queue_query(query);
    }

    /// Search action (enter or the search button): runs without waiting and
    /// moves to the first match.
    pub fn search_submit(&mut self) -> Option<MatchSpan> {
        self.search.submit();
        let span = self.search.active_span()?;
        if self.mode == ViewMode::Edit {
            self.surface.scroll_to_match(span);
        }
        Some(span)
    }

    pub fn next_match(&mut self) -> Option<MatchSpan> {
        self.search.next_into(&mut self.surface)
    }

    pub fn prev_match(&mut self) -> Option<MatchSpan> {
        self.search.prev_into(&mut self.surface)
    }

    pub fn close_search(&mut self) {
        self.search.close(self.preview.as_mut());
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.preview = match mode {
            ViewMode::Edit => None,
            ViewMode::Preview => {
                let mut root = render_markdown(self.buffer.as_str());
                self.search.highlight_preview(&mut root);
                Some(root)
            }
        };
        tracing::debug!(?mode, "view mode changed");
    }

    /// Open another note in this editor. The search starts over.
    pub fn switch_note(&mut self, text: &str) {
        self.buffer = TextBuffer::new(text);
        self.surface.on_note_switched(self.buffer.clone());
        self.search.switch_note(self.buffer.clone());
        if self.mode.is_preview() {
            self.preview = Some(render_markdown(self.buffer.as_str()));
        }
    }

    /// Poll timers. Re-highlights the preview when its settle delay elapses.
    pub fn tick(&mut self) -> Tick {
        let tick = self.search.tick();
        if tick.preview_due {
            if let Some(root) = self.preview.as_mut() {
                let report = self.search.highlight_preview(root);
                tracing::trace!(marks = report.marks, "preview settled");
            }
        }
        tick
    }

    /// Overlay for the editing surface, or `None` in preview mode or while the
    /// matches lag behind the text.
    pub fn overlay_frame(&self) -> Option<OverlayFrame> {
        if self.mode != ViewMode::Edit {
            return None;
        }
        self.overlay.render(
            &self.buffer,
            self.search.matches(),
            self.search.active_index(),
        )
    }

    pub fn preview(&self) -> Option<&Node> {
        self.preview.as_ref()
    }

    pub fn preview_html(&self) -> Option<String> {
        self.preview.as_ref().map(Node::to_html)
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn cursor(&self) -> LineColumn {
        self.surface.cursor()
    }

    pub fn search(&self) -> &SearchSession<C> {
        &self.search
    }

    pub fn surface(&self) -> &SurfaceController<S> {
        &self.surface
    }

    pub fn status_message(&self) -> Option<String> {
        self.search.status_message()
    }
}
