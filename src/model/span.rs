use crate::model::buffer::TextBuffer;
use crate::primitives::offset_index::find_matches;
use std::ops::Range;

/// Half-open char range of one query occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// 1-based line and column of a char offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

impl LineColumn {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for LineColumn {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

/// Match spans together with the revision of the buffer they were found in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    revision: u64,
    spans: Vec<MatchSpan>,
}

impl MatchSet {
    /// Search `buffer` for `query`
    pub fn compute(buffer: &TextBuffer, query: &str, case_sensitive: bool) -> Self {
        Self {
            revision: buffer.revision(),
            spans: find_matches(buffer.as_str(), query, case_sensitive),
        }
    }

    /// A set with no matches that is current for `buffer`
    pub fn empty_for(buffer: &TextBuffer) -> Self {
        Self {
            revision: buffer.revision(),
            spans: Vec::new(),
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether these spans were computed against this snapshot
    pub fn is_current_for(&self, buffer: &TextBuffer) -> bool {
        self.revision == buffer.revision()
    }

    pub fn spans(&self) -> &[MatchSpan] {
        &self.spans
    }

    pub fn get(&self, index: usize) -> Option<MatchSpan> {
        self.spans.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
