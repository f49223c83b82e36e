//! Source ranges in document coordinates.

/// A region of a document, in zero-based lines and character columns.
///
/// Columns are counted in characters of the raw (untrimmed) line. The start
/// column is inclusive. The end column is the character count reached on the
/// end line, so for a single-line token like a method name it is one past
/// the token's last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceRange {
    /// First line of the range.
    pub start_line: u32,
    /// Column on `start_line` where the range begins.
    pub start_col: u32,
    /// Last line of the range.
    pub end_line: u32,
    /// Column on `end_line` where the range ends.
    pub end_col: u32,
}

impl SourceRange {
    /// Create a new range.
    #[inline]
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        debug_assert!(start_line <= end_line);
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// A range covering `start_col..end_col` of a single line.
    #[inline]
    pub fn on_line(line: u32, start_col: u32, end_col: u32) -> Self {
        Self::new(line, start_col, line, end_col.max(start_col))
    }

    /// A range whose end is not known yet.
    ///
    /// The parser hands nodes back to their parent with a provisional range
    /// that starts and ends on the node's first line; the parent calls
    /// [`SourceRange::close`] once it has read past the node.
    #[inline]
    pub fn provisional(line: u32, start_col: u32, line_len: u32) -> Self {
        Self::on_line(line, start_col, line_len)
    }

    /// Fix the end position of this range.
    #[inline]
    pub fn close(&mut self, end_line: u32, end_col: u32) {
        debug_assert!(end_line >= self.start_line);
        self.end_line = end_line.max(self.start_line);
        self.end_col = if self.end_line == self.start_line {
            end_col.max(self.start_col)
        } else {
            end_col
        };
    }

    /// Whether `line` falls between the first and last line, inclusive.
    #[inline]
    pub fn spans_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    /// Whether the position `(line, col)` lies inside this range.
    ///
    /// The end column counts as inside, so a cursor directly after the last
    /// character of a token is still on that token.
    pub fn contains(&self, line: u32, col: u32) -> bool {
        if !self.spans_line(line) {
            return false;
        }
        if line == self.start_line && col < self.start_col {
            return false;
        }
        if line == self.end_line && col > self.end_col {
            return false;
        }
        true
    }

    /// Whether `other` lies entirely within this range.
    pub fn contains_range(&self, other: &SourceRange) -> bool {
        let starts_after = (other.start_line, other.start_col) >= (self.start_line, self.start_col);
        let ends_before = (other.end_line, other.end_col) <= (self.end_line, self.end_col);
        starts_after && ends_before
    }

    /// Whether this range and `other` share at least one line.
    #[inline]
    pub fn overlaps_lines(&self, other: &SourceRange) -> bool {
        self.start_line <= other.end_line && other.start_line <= self.end_line
    }

    /// Extend this range to include another range.
    pub fn extend(&self, other: SourceRange) -> SourceRange {
        let (start_line, start_col) =
            (self.start_line, self.start_col).min((other.start_line, other.start_col));
        let (end_line, end_col) = (self.end_line, self.end_col).max((other.end_line, other.end_col));
        SourceRange::new(start_line, start_col, end_line, end_col)
    }
}

/// Character length of a line, as used for columns.
#[inline]
pub(crate) fn char_len(line: &str) -> u32 {
    line.chars().count() as u32
}

/// Number of leading whitespace characters.
#[inline]
pub(crate) fn leading_whitespace(line: &str) -> u32 {
    line.chars().take_while(|c| c.is_whitespace()).count() as u32
}
