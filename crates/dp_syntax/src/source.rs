//! Source coordinates.
//!
//! A [`Position`] names a point in a source file: the file path, a 1-based line and column
//! counted in Unicode code points, and a 0-based byte offset. Positions are immutable values;
//! moving forward produces a new one via [`Position::after`].

use std::fmt;
use std::sync::Arc;

/// Point in a source file.
///
/// ## Notes
/// - `line == 0` marks an unknown position. Diagnostics render such positions without
///   coordinates.
/// - The path is shared between all positions of one file, so cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub path: Arc<str>,
    pub line: usize,
    pub column: usize,
    pub byte_offset: usize,
}

impl Position {
    /// Position of the first character of the file at `path`.
    pub fn location(path: impl Into<Arc<str>>) -> Self {
        Self {
            path: path.into(),
            line: 1,
            column: 1,
            byte_offset: 0,
        }
    }

    /// Return the position reached by scanning `text` forward from `self`.
    ///
    /// ## Examples
    /// ```rust
    /// use dp_syntax::source::Position;
    ///
    /// let end = Position::location("a.dp").after("é\nab");
    /// assert_eq!((end.line, end.column, end.byte_offset), (2, 3, 5));
    /// ```
    pub fn after(&self, text: &str) -> Position {
        let mut pos = self.clone();
        for c in text.chars() {
            pos.advance(c);
        }
        pos
    }

    /// Step over a single character.
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.byte_offset += c.len_utf8();
    }

    /// Whether the position points at a known line.
    pub fn is_known(&self) -> bool {
        self.line > 0
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            path: Arc::from(""),
            line: 0,
            column: 0,
            byte_offset: 0,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_starts_at_one() {
        let pos = Position::location("x.dp");
        assert_eq!((pos.line, pos.column, pos.byte_offset), (1, 1, 0));
        assert_eq!(pos.to_string(), "x.dp:1:1");
    }

    #[test]
    fn test_after_counts_code_points_and_bytes() {
        let pos = Position::location("x.dp").after("äö");
        assert_eq!(pos.column, 3);
        assert_eq!(pos.byte_offset, 4);
    }

    #[test]
    fn test_newline_resets_column() {
        let pos = Position::location("x.dp").after("abc\n\nd");
        assert_eq!((pos.line, pos.column), (3, 2));
    }

    #[test]
    fn test_after_keeps_path() {
        let start = Position::location("dir/x.dp");
        let pos = start.after("a");
        assert!(Arc::ptr_eq(&start.path, &pos.path));
    }

    #[test]
    fn test_default_is_unknown() {
        assert!(!Position::default().is_known());
    }
}
