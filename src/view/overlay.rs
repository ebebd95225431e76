//! Search highlight overlay for the plain-text editing surface
//!
//! The overlay is a transparent layer stacked on the editing surface. It
//! paints one rectangle per match (one per line segment for matches that
//! contain a newline) at positions derived from the surface's font metrics,
//! and never takes input: pointer and keyboard events belong to the surface.
//!
//! # Staleness
//! A [`MatchSet`] remembers the revision of the buffer it was computed
//! against. If the buffer has moved on, the overlay draws nothing until the
//! matches are recomputed, rather than drawing rectangles over the wrong text.

use crate::model::buffer::TextBuffer;
use crate::model::span::{MatchSet, MatchSpan};
use crate::primitives::display_width::ColumnCursor;
use crate::primitives::position::LineIndex;
use crate::view::FontMetrics;

/// Visual appearance of a highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightFace {
    /// Any match of the query
    Match,
    /// The match the session is currently positioned on
    ActiveMatch,
}

/// One painted rectangle, in pixels relative to the overlay's visible area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightRect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
    pub face: HighlightFace,
    /// Index of the match this rectangle belongs to
    pub match_index: usize,
}

/// Everything needed to paint the overlay once
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub rects: Vec<HighlightRect>,
    pub scroll_top: f32,
    pub scroll_left: f32,
    /// Buffer revision the rectangles were laid out against
    pub revision: u64,
}

impl OverlayFrame {
    /// The overlay is presentation only
    pub fn intercepts_input(&self) -> bool {
        false
    }
}

/// Lays out highlight rectangles over the editing surface
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    metrics: FontMetrics,
    tab_size: usize,
    scroll_top: f32,
    scroll_left: f32,
}

impl OverlayRenderer {
    pub fn new(metrics: FontMetrics, tab_size: usize) -> Self {
        Self {
            metrics,
            tab_size,
            scroll_top: 0.0,
            scroll_left: 0.0,
        }
    }

    /// Mirror the surface's scroll position. Called from the surface's scroll
    /// event itself (wheel, keyboard or programmatic), never polled.
    pub fn on_surface_scroll(&mut self, scroll_top: f32, scroll_left: f32) {
        self.scroll_top = scroll_top;
        self.scroll_left = scroll_left;
    }

    pub fn scroll_offset(&self) -> (f32, f32) {
        (self.scroll_top, self.scroll_left)
    }

    /// Lay out the overlay for `matches` over `buffer`.
    ///
    /// Returns `None` when the matches were computed against a different
    /// snapshot than `buffer`.
    pub fn render(
        &self,
        buffer: &TextBuffer,
        matches: &MatchSet,
        active: Option<usize>,
    ) -> Option<OverlayFrame> {
        if !matches.is_current_for(buffer) {
            tracing::trace!(
                buffer_revision = buffer.revision(),
                match_revision = matches.revision(),
                "overlay suppressed: matches are stale"
            );
            return None;
        }

        let mut rects = Vec::with_capacity(matches.len());
        if !matches.is_empty() {
            let text = buffer.as_str();
            let index = LineIndex::new(text);
            // Spans are ascending, so each line is scanned once however many
            // matches it holds.
            let mut columns: Option<(usize, ColumnCursor)> = None;
            for (match_index, span) in matches.spans().iter().enumerate() {
                let face = if active == Some(match_index) {
                    HighlightFace::ActiveMatch
                } else {
                    HighlightFace::Match
                };
                self.layout_span(text, &index, &mut columns, *span, face, match_index, &mut rects);
            }
        }

        Some(OverlayFrame {
            rects,
            scroll_top: self.scroll_top,
            scroll_left: self.scroll_left,
            revision: buffer.revision(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn layout_span<'a>(
        &self,
        text: &'a str,
        index: &LineIndex,
        columns: &mut Option<(usize, ColumnCursor<'a>)>,
        span: MatchSpan,
        face: HighlightFace,
        match_index: usize,
        rects: &mut Vec<HighlightRect>,
    ) {
        let first_line = index.line_of(span.start);
        let last_line = index.line_of(span.end.saturating_sub(1).max(span.start));

        for line in first_line..=last_line {
            let chars = index.line_chars(line);
            let seg_start = span.start.max(chars.start) - chars.start;
            let seg_end = span.end.min(chars.end).saturating_sub(chars.start);
            if seg_end <= seg_start {
                // Only the newline of this line is matched; it has no glyph
                continue;
            }

            if columns.as_ref().map(|(current, _)| *current) != Some(line) {
                let line_text = &text[index.line_bytes(line)];
                *columns = Some((line, ColumnCursor::new(line_text, self.tab_size)));
            }
            let Some((_, cursor)) = columns.as_mut() else {
                continue;
            };
            let x0 = cursor.seek(seg_start);
            let x1 = cursor.seek(seg_end);
            let m = &self.metrics;
            rects.push(HighlightRect {
                top: m.padding_top + m.line_height * line as f32 - self.scroll_top,
                left: m.padding_left + m.char_width * x0 as f32 - self.scroll_left,
                width: m.char_width * (x1 - x0) as f32,
                height: m.line_height,
                face,
                match_index,
            });
        }
    }
}
