//! In-note search session
//!
//! Owns the query, the current match list and the active match for one open
//! note. Keystrokes go through a debounce timer; explicit submission applies
//! the query immediately. Every applied query or content change also arms a
//! settle timer, after which the rendered preview should be re-highlighted.
//!
//! Timers are polled from [`SearchSession::tick`], so the session never runs
//! work behind the caller's back. The debounced path and [`set_query`] are
//! the only writers of the match list.
//!
//! [`set_query`]: SearchSession::set_query

use crate::config::SearchConfig;
use crate::model::buffer::TextBuffer;
use crate::model::span::{MatchSet, MatchSpan};
use crate::preview::highlight::{self, clear_highlights, HighlightReport};
use crate::preview::node::Node;
use crate::primitives::timer::{CancellableTimer, Clock, SystemClock};
use crate::view::surface::{SurfaceController, TextSurface};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchState {
    /// No query, or nothing to search in
    #[default]
    Idle,
    /// A non-blank query is applied to a non-empty buffer
    Searching,
}

/// What fired during one [`SearchSession::tick`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tick {
    /// The debounced query was applied and the match list replaced
    pub matches_changed: bool,
    /// The preview should be highlighted again
    pub preview_due: bool,
}

pub struct SearchSession<C: Clock = SystemClock> {
    clock: C,
    case_sensitive: bool,
    buffer: TextBuffer,
    state: SearchState,
    /// Query the current matches were computed for
    query: String,
    /// Typed query waiting for the debounce timer
    pending_query: Option<String>,
    matches: MatchSet,
    active_index: Option<usize>,
    debounce: CancellableTimer,
    settle: CancellableTimer,
}

impl SearchSession<SystemClock> {
    pub fn new(buffer: TextBuffer, config: &SearchConfig) -> Self {
        Self::with_clock(buffer, config, SystemClock)
    }
}

impl<C: Clock> SearchSession<C> {
    pub fn with_clock(buffer: TextBuffer, config: &SearchConfig, clock: C) -> Self {
        Self {
            clock,
            case_sensitive: config.case_sensitive,
            matches: MatchSet::empty_for(&buffer),
            buffer,
            state: SearchState::Idle,
            query: String::new(),
            pending_query: None,
            active_index: None,
            debounce: CancellableTimer::from_millis(config.debounce_ms),
            settle: CancellableTimer::from_millis(config.settle_delay_ms),
        }
    }

    /// Apply `query` now, dropping any keystroke still waiting for the debounce
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.pending_query = None;
        self.debounce.cancel();
        self.apply_query(query.into());
    }

    /// Record a keystroke's query; it is applied by [`tick`](Self::tick) once
    /// typing pauses for the debounce delay.
    pub fn queue_query(&mut self, query: impl Into<String>) {
        self.pending_query = Some(query.into());
        self.debounce.schedule(self.clock.now());
    }

    /// Explicit search action: apply the pending (or current) query now
    pub fn submit(&mut self) {
        let query = self
            .pending_query
            .take()
            .unwrap_or_else(|| self.query.clone());
        self.set_query(query);
    }

    /// The note's content was replaced by a new snapshot.
    ///
    /// The existing matches become stale; an active search is re-run through
    /// the debounce timer.
    pub fn on_buffer_changed(&mut self, buffer: TextBuffer) {
        self.buffer = buffer;
        let now = self.clock.now();
        if self.state == SearchState::Searching || self.pending_query.is_some() {
            self.debounce.schedule(now);
        }
        self.settle.schedule(now);
    }

    /// Start over for another note. Nothing scheduled for the old note fires.
    pub fn switch_note(&mut self, buffer: TextBuffer) {
        let cancelled_debounce = self.debounce.cancel();
        let cancelled_settle = self.settle.cancel();
        tracing::debug!(
            cancelled_debounce,
            cancelled_settle,
            "search session reset for new note"
        );
        self.pending_query = None;
        self.query.clear();
        self.state = SearchState::Idle;
        self.matches = MatchSet::empty_for(&buffer);
        self.active_index = None;
        self.buffer = buffer;
    }

    /// Poll the timers
    pub fn tick(&mut self) -> Tick {
        let now = self.clock.now();
        let mut tick = Tick::default();

        if self.debounce.fire_if_due(now) {
            let query = self
                .pending_query
                .take()
                .unwrap_or_else(|| self.query.clone());
            self.apply_query(query);
            tick.matches_changed = true;
        }
        if self.settle.fire_if_due(now) {
            tick.preview_due = true;
        }

        tick
    }

    /// Step to the next match, wrapping after the last
    pub fn next(&mut self) -> Option<MatchSpan> {
        self.step(true)
    }

    /// Step to the previous match, wrapping before the first
    pub fn prev(&mut self) -> Option<MatchSpan> {
        self.step(false)
    }

    /// [`next`](Self::next), then move the surface to the new match
    pub fn next_into<S: TextSurface>(
        &mut self,
        surface: &mut SurfaceController<S>,
    ) -> Option<MatchSpan> {
        let span = self.next()?;
        surface.scroll_to_match(span);
        Some(span)
    }

    /// [`prev`](Self::prev), then move the surface to the new match
    pub fn prev_into<S: TextSurface>(
        &mut self,
        surface: &mut SurfaceController<S>,
    ) -> Option<MatchSpan> {
        let span = self.prev()?;
        surface.scroll_to_match(span);
        Some(span)
    }

    /// End the search. Clears the query and matches, cancels both timers and
    /// removes the markers from `preview` if one is shown.
    pub fn close(&mut self, preview: Option<&mut Node>) {
        self.debounce.cancel();
        self.settle.cancel();
        self.pending_query = None;
        self.query.clear();
        self.state = SearchState::Idle;
        self.matches = MatchSet::empty_for(&self.buffer);
        self.active_index = None;

        if let Some(root) = preview {
            let removed = clear_highlights(root);
            tracing::debug!(removed, "search closed, preview markers removed");
        }
    }

    /// Highlight the current query in `root`. With no query this only clears
    /// the previous markers.
    pub fn highlight_preview(&self, root: &mut Node) -> HighlightReport {
        highlight::highlight_preview(root, &self.query, self.case_sensitive)
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        if self.case_sensitive == case_sensitive {
            return;
        }
        self.case_sensitive = case_sensitive;
        if self.state == SearchState::Searching {
            self.apply_query(self.query.clone());
        }
    }

    /// Status line text for the current state
    pub fn status_message(&self) -> Option<String> {
        if self.state == SearchState::Idle {
            return None;
        }
        if self.matches.is_empty() {
            return Some(format!("No matches found for '{}'", self.query));
        }
        self.active_index
            .map(|i| format!("Match {} of {}", i + 1, self.matches.len()))
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn pending_query(&self) -> Option<&str> {
        self.pending_query.as_deref()
    }

    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_span(&self) -> Option<MatchSpan> {
        self.active_index.and_then(|i| self.matches.get(i))
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn is_debouncing(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_pending()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn apply_query(&mut self, query: String) {
        self.query = query;
        self.recompute();
        self.settle.schedule(self.clock.now());
    }

    fn recompute(&mut self) {
        if self.query.trim().is_empty() || self.buffer.is_empty() {
            self.state = SearchState::Idle;
            self.matches = MatchSet::empty_for(&self.buffer);
            self.active_index = None;
            return;
        }

        self.matches = MatchSet::compute(&self.buffer, &self.query, self.case_sensitive);
        self.state = SearchState::Searching;
        self.active_index = if self.matches.is_empty() { None } else { Some(0) };
        tracing::debug!(
            query = %self.query,
            matches = self.matches.len(),
            revision = self.matches.revision(),
            "matches recomputed"
        );
    }

    fn step(&mut self, forward: bool) -> Option<MatchSpan> {
        if self.state != SearchState::Searching {
            return None;
        }
        // An edit may still be waiting for the debounce; never navigate
        // through spans of an older snapshot. The old position means nothing
        // in the new match list, so navigation starts over from its ends.
        let recomputed = !self.matches.is_current_for(&self.buffer);
        if recomputed {
            self.debounce.cancel();
            let query = self
                .pending_query
                .take()
                .unwrap_or_else(|| self.query.clone());
            self.apply_query(query);
        }

        let count = self.matches.len();
        if count == 0 {
            return None;
        }
        let current = if recomputed { None } else { self.active_index };
        let index = match (current, forward) {
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
            (None, true) => 0,
            (None, false) => count - 1,
        };
        self.active_index = Some(index);
        tracing::trace!(index, count, "active match moved");
        self.matches.get(index)
    }
}
