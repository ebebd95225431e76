//! Controller for the plain-text editing surface
//!
//! The surface itself (a text area in whatever toolkit hosts the editor) is
//! injected through [`TextSurface`]. The controller tracks the caret's line
//! and column and drives the surface to a search match. While no surface is
//! mounted every operation is a no-op, since callbacks can arrive after the
//! surface was torn down.

use crate::model::buffer::TextBuffer;
use crate::model::span::{LineColumn, MatchSpan};
use crate::primitives::position::offset_to_line_column;
use crate::view::FontMetrics;
use std::ops::Range;

/// Default number of lines kept visible above a match when scrolling to it
pub const DEFAULT_CONTEXT_LINES: usize = 5;

/// Selection, scroll position and focus applied to the surface in one step
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceUpdate {
    /// Selected char range
    pub selection: Range<usize>,
    /// Vertical scroll offset in pixels
    pub scroll_top: f32,
    /// Whether the surface takes keyboard focus
    pub focus: bool,
}

/// A mounted plain-text editing surface
pub trait TextSurface {
    /// Apply an update as one visible change.
    ///
    /// Implementations must not render an intermediate state where focus has
    /// moved without the selection, or the selection without the scroll.
    fn apply(&mut self, update: SurfaceUpdate);
}

/// Tracks the caret and navigates the surface to matches
#[derive(Debug)]
pub struct SurfaceController<S> {
    surface: Option<S>,
    buffer: TextBuffer,
    line_count: usize,
    cursor: LineColumn,
    metrics: FontMetrics,
    context_lines: usize,
}

impl<S: TextSurface> SurfaceController<S> {
    pub fn new(metrics: FontMetrics, context_lines: usize) -> Self {
        Self {
            surface: None,
            buffer: TextBuffer::empty(),
            line_count: 1,
            cursor: LineColumn::default(),
            metrics,
            context_lines,
        }
    }

    /// Attach a surface showing `buffer`
    pub fn mount(&mut self, surface: S, buffer: TextBuffer) {
        self.surface = Some(surface);
        self.line_count = buffer.line_count();
        self.buffer = buffer;
        self.cursor = LineColumn::default();
    }

    /// Detach the surface, returning it
    pub fn unmount(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Caret position as of the last selection event
    pub fn cursor(&self) -> LineColumn {
        self.cursor
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// The surface's text was replaced. The caret is left where it is.
    pub fn on_content_changed(&mut self, buffer: TextBuffer) {
        if self.surface.is_none() {
            tracing::trace!("content change ignored: surface not mounted");
            return;
        }
        self.line_count = buffer.line_count();
        self.buffer = buffer;
    }

    /// A different note replaced the content; its caret starts at the top
    pub fn on_note_switched(&mut self, buffer: TextBuffer) {
        self.line_count = buffer.line_count();
        self.buffer = buffer;
        self.cursor = LineColumn::default();
    }

    /// The caret moved (click, key release or explicit selection).
    ///
    /// Runs for every event, key repeats included; the cursor indicator
    /// depends on it.
    pub fn on_selection_changed(&mut self, caret: usize) {
        if self.surface.is_none() {
            return;
        }
        self.cursor = offset_to_line_column(self.buffer.as_str(), caret);
        tracing::trace!(
            caret,
            line = self.cursor.line,
            column = self.cursor.column,
            "cursor moved"
        );
    }

    /// Vertical scroll offset that shows `line` (1-based) with context above it
    pub fn scroll_top_for_line(&self, line: usize) -> f32 {
        let first_visible = line.saturating_sub(1).saturating_sub(self.context_lines);
        first_visible as f32 * self.metrics.line_height
    }

    /// Select `span`, focus the surface and scroll it into view
    pub fn scroll_to_match(&mut self, span: MatchSpan) {
        if self.surface.is_none() {
            tracing::trace!("scroll_to_match ignored: surface not mounted");
            return;
        }

        let len = self.buffer.len_chars();
        let start = span.start.min(len);
        let end = span.end.clamp(start, len);
        let target = offset_to_line_column(self.buffer.as_str(), start);

        let update = SurfaceUpdate {
            selection: start..end,
            scroll_top: self.scroll_top_for_line(target.line),
            focus: true,
        };
        tracing::debug!(?update, line = target.line, "scrolling to match");
        if let Some(surface) = self.surface.as_mut() {
            surface.apply(update);
        }

        // The caret of a forward selection sits at its end
        self.cursor = offset_to_line_column(self.buffer.as_str(), end);
    }

    /// Entry point for the surrounding UI: navigate to `length` chars at `offset`
    pub fn scroll_to_search_result(&mut self, offset: usize, length: usize) {
        self.scroll_to_match(MatchSpan::new(offset, offset.saturating_add(length)));
    }
}
