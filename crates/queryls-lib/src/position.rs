//! Conversions between byte offsets and editor positions.
//!
//! Editors count columns in UTF-16 code units; the tree counts bytes.

use std::collections::HashMap;

use rowan::TextSize;
use serde::{Deserialize, Serialize};

/// Zero-based line and UTF-16 column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A character that is more than one byte wide in UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WideChar {
    /// Byte column within its line.
    start: u32,
    len_utf8: u32,
    len_utf16: u32,
}

impl WideChar {
    fn end(&self) -> u32 {
        self.start + self.len_utf8
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of every line.
    line_starts: Vec<TextSize>,
    /// Offset just past the content of every line, line terminator excluded.
    line_ends: Vec<TextSize>,
    wide_chars: HashMap<u32, Vec<WideChar>>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        let mut line_ends = Vec::new();
        let mut wide_chars: HashMap<u32, Vec<WideChar>> = HashMap::new();
        let mut line = 0u32;
        let mut line_start = 0usize;
        let mut prev = None;

        for (i, c) in text.char_indices() {
            if c == '\n' {
                let end = if prev == Some('\r') { i - 1 } else { i };
                line_ends.push(TextSize::from(end as u32));
                line_starts.push(TextSize::from((i + 1) as u32));
                line += 1;
                line_start = i + 1;
            } else if c.len_utf8() > 1 {
                wide_chars.entry(line).or_default().push(WideChar {
                    start: (i - line_start) as u32,
                    len_utf8: c.len_utf8() as u32,
                    len_utf16: c.len_utf16() as u32,
                });
            }
            prev = Some(c);
        }
        line_ends.push(TextSize::from(text.len() as u32));

        Self {
            line_starts,
            line_ends,
            wide_chars,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn len(&self) -> TextSize {
        self.line_ends.last().copied().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == TextSize::from(0)
    }

    /// Byte offset of `position`. Columns past the end of a line clamp to
    /// the line end; lines past the end of the text yield `None`.
    pub fn offset(&self, position: Position) -> Option<TextSize> {
        let line = position.line as usize;
        let start = *self.line_starts.get(line)?;
        let end = self.line_ends[line];

        let mut col = position.character;
        for c in self.line_wide_chars(position.line) {
            if col <= c.start {
                break;
            }
            col = col.saturating_add(c.len_utf8 - c.len_utf16);
        }

        Some(start + TextSize::from(col.min(u32::from(end - start))))
    }

    /// Position of `offset`, clamped to the end of the text.
    pub fn position(&self, offset: TextSize) -> Position {
        let offset = offset.min(self.len());
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let byte_col = u32::from(offset - self.line_starts[line]);

        let mut col = byte_col;
        for c in self.line_wide_chars(line as u32) {
            if c.end() > byte_col {
                break;
            }
            col -= c.len_utf8 - c.len_utf16;
        }

        Position::new(line as u32, col)
    }

    fn line_wide_chars(&self, line: u32) -> &[WideChar] {
        self.wide_chars.get(&line).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset(index: &LineIndex, line: u32, character: u32) -> Option<u32> {
        index.offset(Position::new(line, character)).map(u32::from)
    }

    #[test]
    fn ascii_lines() {
        let index = LineIndex::new("(a)\n(bc)\n");

        assert_eq!(index.line_count(), 3);
        assert_eq!(offset(&index, 0, 0), Some(0));
        assert_eq!(offset(&index, 1, 2), Some(6));
        assert_eq!(offset(&index, 2, 0), Some(9));
        assert_eq!(offset(&index, 3, 0), None);
        assert_eq!(index.position(TextSize::from(6)), Position::new(1, 2));
    }

    #[test]
    fn column_clamps_to_line_end() {
        let index = LineIndex::new("(a)\r\n(b)");

        assert_eq!(offset(&index, 0, 40), Some(3));
        assert_eq!(offset(&index, 1, 40), Some(8));
    }

    #[test]
    fn huge_column_clamps() {
        let index = LineIndex::new("a\nb");
        assert_eq!(offset(&index, 1, u32::MAX), Some(3));

        let index = LineIndex::new("(é)");
        assert_eq!(offset(&index, 0, u32::MAX), Some(4));
    }

    #[test]
    fn utf16_columns() {
        // `é` is 2 bytes and 1 unit, `𝕏` is 4 bytes and 2 units.
        let index = LineIndex::new("\"é𝕏\" (a)");

        assert_eq!(offset(&index, 0, 2), Some(3));
        assert_eq!(offset(&index, 0, 4), Some(7));
        assert_eq!(offset(&index, 0, 5), Some(8));
        assert_eq!(index.position(TextSize::from(7)), Position::new(0, 4));
        assert_eq!(index.position(TextSize::from(9)), Position::new(0, 6));
    }

    #[test]
    fn position_past_end_clamps() {
        let index = LineIndex::new("(a)");
        assert_eq!(index.position(TextSize::from(99)), Position::new(0, 3));
    }
}
