//! Mapping between char offsets and 1-based line/column positions
//!
//! The free functions scan the text directly and are cheap enough to run on
//! every cursor event. `LineIndex` precomputes line starts for callers that
//! map many offsets against the same snapshot (the overlay renderer).

use crate::model::span::LineColumn;
use std::ops::Range;

/// Line and column of `offset`, clamping the offset to `[0, len_chars]`
pub fn offset_to_line_column(text: &str, offset: usize) -> LineColumn {
    let mut line = 1;
    let mut line_start = 0;
    let mut consumed = 0;

    for ch in text.chars().take(offset) {
        consumed += 1;
        if ch == '\n' {
            line += 1;
            line_start = consumed;
        }
    }

    LineColumn {
        line,
        column: consumed - line_start + 1,
    }
}

/// Char offset of the first column of 1-based `line`.
///
/// Lines before the first clamp to line 1, lines past the end clamp to the
/// last line.
pub fn line_start_offset(text: &str, line: usize) -> usize {
    let target = line.max(1);
    let mut current = 1;
    let mut last_start = 0;

    for (idx, ch) in text.chars().enumerate() {
        if current == target {
            return last_start;
        }
        if ch == '\n' {
            current += 1;
            last_start = idx + 1;
        }
    }

    last_start
}

/// Precomputed line starts of one text snapshot
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// (char offset, byte offset) of the first char of each line
    starts: Vec<(usize, usize)>,
    len_chars: usize,
    len_bytes: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![(0, 0)];
        let mut len_chars = 0;
        for (byte, ch) in text.char_indices() {
            len_chars += 1;
            if ch == '\n' {
                starts.push((len_chars, byte + 1));
            }
        }
        Self {
            starts,
            len_chars,
            len_bytes: text.len(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// 0-based index of the line containing `offset` (clamped)
    pub fn line_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.len_chars);
        self.starts.partition_point(|&(start, _)| start <= offset) - 1
    }

    /// Same result as [`offset_to_line_column`]
    pub fn line_column(&self, offset: usize) -> LineColumn {
        let offset = offset.min(self.len_chars);
        let line = self.line_of(offset);
        LineColumn {
            line: line + 1,
            column: offset - self.starts[line].0 + 1,
        }
    }

    /// Same result as [`line_start_offset`]
    pub fn line_start(&self, line: usize) -> usize {
        let idx = line.clamp(1, self.line_count()) - 1;
        self.starts[idx].0
    }

    /// Char range of a 0-based line, without its trailing newline
    pub fn line_chars(&self, line: usize) -> Range<usize> {
        let start = self.starts[line].0;
        let end = match self.starts.get(line + 1) {
            Some(&(next, _)) => next - 1,
            None => self.len_chars,
        };
        start..end
    }

    /// Byte range of a 0-based line, without its trailing newline
    pub fn line_bytes(&self, line: usize) -> Range<usize> {
        let start = self.starts[line].1;
        let end = match self.starts.get(line + 1) {
            Some(&(_, next)) => next - 1,
            None => self.len_bytes,
        };
        start..end
    }
}
