//! Source location utilities for converting byte offsets to line/column positions
//!
//! Diagnostics carry 1-based line and column numbers, the way Go tooling prints
//! them (`file.go:3:14`). Internally offsets stay as byte ranges until an error
//! needs to be reported.

use serde::Serialize;
use std::fmt;

/// A 1-based line/column position. Columns count bytes, as `go/token` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
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

/// Provides fast conversion from byte offsets to line/column positions
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self { line_starts }
    }

    /// Convert a byte offset to a 1-based line/column position
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let column = byte_offset - self.line_starts[line];

        Position::new(line + 1, column + 1)
    }

    /// 0-based index of the line holding `byte_offset`
    pub fn line_index(&self, byte_offset: usize) -> usize {
        self.byte_to_position(byte_offset).line - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_to_position_single_line() {
        let loc = SourceLocation::new("package user");
        assert_eq!(loc.byte_to_position(0), Position::new(1, 1));
        assert_eq!(loc.byte_to_position(8), Position::new(1, 9));
    }

    #[test]
    fn test_byte_to_position_multiline() {
        let loc = SourceLocation::new("package a\n\ntype T int\n");

        assert_eq!(loc.byte_to_position(9), Position::new(1, 10));
        assert_eq!(loc.byte_to_position(10), Position::new(2, 1));
        assert_eq!(loc.byte_to_position(11), Position::new(3, 1));
        assert_eq!(loc.byte_to_position(16), Position::new(3, 6));
    }

    #[test]
    fn test_line_index() {
        let loc = SourceLocation::new("a\nb\nc");
        assert_eq!(loc.line_index(0), 0);
        assert_eq!(loc.line_index(2), 1);
        assert_eq!(loc.line_index(4), 2);
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 14).to_string(), "3:14");
    }
}
