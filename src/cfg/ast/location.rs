//! Line/column positions for byte offsets
//!
//! Tokens and nodes carry byte ranges. Diagnostics want zero-based
//! line/column pairs, which [`SourceLocation`] computes from a table of line
//! starts built once per source buffer. Columns count bytes, not characters.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start and end positions, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

pub struct SourceLocation {
    line_starts: Vec<usize>,
    len: usize,
}

impl SourceLocation {
    pub fn new(source: impl AsRef<[u8]>) -> Self {
        let source = source.as_ref();
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| **b == b'\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Offsets past the end of the source clamp to the end
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let offset = byte_offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position::new(line, offset - self.line_starts[line])
    }

    pub fn range_to_span(&self, range: &Range<usize>) -> Span {
        Span::new(
            self.byte_to_position(range.start),
            self.byte_to_position(range.end),
        )
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let loc = SourceLocation::new("x = 1;");
        assert_eq!(loc.byte_to_position(0), Position::new(0, 0));
        assert_eq!(loc.byte_to_position(4), Position::new(0, 4));
        assert_eq!(loc.line_count(), 1);
    }

    #[test]
    fn test_multiline() {
        let loc = SourceLocation::new("#!KAMAILIO\nrequest_route {\n}\n");
        assert_eq!(loc.byte_to_position(11), Position::new(1, 0));
        assert_eq!(loc.byte_to_position(25), Position::new(1, 14));
        assert_eq!(loc.byte_to_position(27), Position::new(2, 0));
        assert_eq!(loc.line_count(), 4);
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let loc = SourceLocation::new("ab\ncd");
        assert_eq!(loc.byte_to_position(100), Position::new(1, 2));
    }

    #[test]
    fn test_range_to_span() {
        let loc = SourceLocation::new("x = 1;\ny = @;");
        let span = loc.range_to_span(&(11..12));
        assert_eq!(span, Span::new(Position::new(1, 4), Position::new(1, 5)));
        assert_eq!(span.to_string(), "1:4..1:5");
        assert!(span.contains(Position::new(1, 4)));
        assert!(!span.contains(Position::new(1, 5)));
    }
}
