//! Display width of text in a monospace editing surface
//!
//! Wide chars (CJK, most emoji) take two cells, tabs advance to the next tab
//! stop. Control chars without a defined width count as one cell.

use unicode_width::UnicodeWidthChar;

/// Cells occupied by `ch` when not a tab
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Visual column reached after drawing `ch` starting at `column`
pub fn advance(column: usize, ch: char, tab_size: usize) -> usize {
    if ch == '\t' {
        let tab = tab_size.max(1);
        column + (tab - column % tab)
    } else {
        column + char_width(ch)
    }
}

/// Visual column after drawing `text` from column 0
pub fn visual_column(text: &str, tab_size: usize) -> usize {
    text.chars().fold(0, |col, ch| advance(col, ch, tab_size))
}

/// Visual columns of ascending char offsets within one line, found in a
/// single pass over the line
#[derive(Debug, Clone)]
pub struct ColumnCursor<'a> {
    chars: std::str::Chars<'a>,
    tab_size: usize,
    char_pos: usize,
    column: usize,
}

impl<'a> ColumnCursor<'a> {
    pub fn new(line: &'a str, tab_size: usize) -> Self {
        Self {
            chars: line.chars(),
            tab_size,
            char_pos: 0,
            column: 0,
        }
    }

    /// Column where char `offset` starts. Offsets past the end of the line
    /// give the line's width; offsets behind the previous seek give the
    /// current column.
    pub fn seek(&mut self, offset: usize) -> usize {
        while self.char_pos < offset {
            let Some(ch) = self.chars.next() else {
                break;
            };
            self.column = advance(self.column, ch, self.tab_size);
            self.char_pos += 1;
        }
        self.column
    }
}
