//! Byte ranges and line/column positions within DSL text.

use std::fmt;
use std::ops::Range;

pub use text_size::TextRange;
pub use text_size::TextSize;

/// Build a [`TextRange`] from a `usize` byte range, as produced by the lexer.
///
/// DSL text longer than `u32::MAX` bytes is not supported; offsets saturate.
#[inline]
pub fn range_of(span: Range<usize>) -> TextRange {
    let start = u32::try_from(span.start).unwrap_or(u32::MAX);
    let end = u32::try_from(span.end).unwrap_or(u32::MAX);
    TextRange::new(TextSize::from(start), TextSize::from(end.max(start)))
}

/// A line and column position in DSL text.
///
/// Both are 0-indexed internally and displayed 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct LineCol {
    pub line: u32,
    /// Column in UTF-8 bytes.
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// 1-indexed line number, for display.
    #[inline]
    pub const fn line_one_indexed(self) -> u32 {
        self.line + 1
    }

    /// 1-indexed column number, for display.
    #[inline]
    pub const fn col_one_indexed(self) -> u32 {
        self.col + 1
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

/// Index for converting byte offsets into line/column positions.
///
/// Stream definitions are usually a single line, but whitespace (newlines
/// included) is insignificant, so definitions pasted from files may span
/// several.
#[derive(Clone, Debug)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        line_starts.extend(
            text.match_indices('\n')
                .map(|(offset, _)| TextSize::from((offset + 1) as u32)),
        );
        Self { line_starts }
    }

    /// Convert a byte offset to a line/column position.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line];
        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// Number of lines in the indexed text.
    pub fn len(&self) -> usize {
        self.line_starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_starts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_display() {
        assert_eq!(LineCol::new(0, 0).to_string(), "1:1");
        assert_eq!(LineCol::new(2, 7).to_string(), "3:8");
    }

    #[test]
    fn test_line_index_single_line() {
        let index = LineIndex::new("time | log");

        assert_eq!(index.len(), 1);
        assert_eq!(index.line_col(TextSize::from(0)), LineCol::new(0, 0));
        assert_eq!(index.line_col(TextSize::from(7)), LineCol::new(0, 7));
    }

    #[test]
    fn test_line_index_multi_line() {
        let index = LineIndex::new("time\n| filter\n| log");

        assert_eq!(index.len(), 3);
        assert_eq!(index.line_col(TextSize::from(4)), LineCol::new(0, 4));
        assert_eq!(index.line_col(TextSize::from(5)), LineCol::new(1, 0));
        assert_eq!(index.line_col(TextSize::from(16)), LineCol::new(2, 2));
    }

    #[test]
    fn test_range_of() {
        let range = range_of(5..7);
        assert_eq!(u32::from(range.start()), 5);
        assert_eq!(u32::from(range.end()), 7);
    }
}
