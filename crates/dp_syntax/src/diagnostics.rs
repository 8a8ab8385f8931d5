//! Position-tagged errors for the dp front end.
//!
//! Lexing and parsing report failures as a [`SourceError`]: a message anchored at a
//! [`Position`], optionally carrying the failures of every parser alternative that was tried at
//! that point.
//!
//! ## Notes
//! - The `Display` rendering is `path:LLLL:CCC: message`, with the line zero-padded to four
//!   digits and the column to three. Sub-errors follow on their own lines, each nesting level
//!   indented two more spaces.
//! - The library returns errors untouched; callers decide how to present them.
//!
//! ## Examples
//! ```rust
//! use dp_syntax::diagnostics::SourceError;
//! use dp_syntax::source::Position;
//!
//! let pos = Position::location("a.dp").after("x\n  ");
//! let err = SourceError::syntax(pos, "syntax error");
//! assert_eq!(err.to_string(), "a.dp:0002:003: syntax error");
//! ```

use std::fmt::Write as _;

use crate::source::Position;

/// Failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input bytes are not valid UTF-8.
    Encoding,
    /// No token rule matches.
    Lexical,
    /// No parser alternative matches.
    Syntax,
}

impl ErrorKind {
    /// Stable diagnostic code.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Encoding => "dp::encoding",
            ErrorKind::Lexical => "dp::lexical",
            ErrorKind::Syntax => "dp::syntax",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Encoding => write!(f, "encoding error"),
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
        }
    }
}

/// Error anchored at a source position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.render(""))]
pub struct SourceError {
    kind: ErrorKind,
    position: Position,
    message: String,
    sub_errors: Vec<SourceError>,
}

impl SourceError {
    pub fn new(kind: ErrorKind, position: Position, message: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            message: message.into(),
            sub_errors: Vec::new(),
        }
    }

    pub fn encoding(position: Position, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Encoding, position, message)
    }

    pub fn lexical(position: Position, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Lexical, position, message)
    }

    pub fn syntax(position: Position, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, position, message)
    }

    /// Attach the failures that led to this one.
    pub fn with_sub_errors(mut self, sub_errors: Vec<SourceError>) -> Self {
        self.sub_errors = sub_errors;
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Message without position prefix or sub-errors.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn sub_errors(&self) -> &[SourceError] {
        &self.sub_errors
    }

    /// Render with `indent` placed between the position prefix and the message.
    pub fn render(&self, indent: &str) -> String {
        let mut out = String::new();
        self.render_into(&mut out, indent);
        out
    }

    fn render_into(&self, out: &mut String, indent: &str) {
        if !self.position.path.is_empty() {
            out.push_str(&self.position.path);
            out.push(':');
        }
        if self.position.is_known() {
            let _ = write!(out, "{:04}:{:03}: ", self.position.line, self.position.column);
        }
        out.push_str(indent);
        out.push_str(&self.message);

        if !self.sub_errors.is_empty() {
            out.push(':');
            let nested = format!("  {indent}");
            for sub in &self.sub_errors {
                out.push('\n');
                sub.render_into(out, &nested);
            }
        }
    }
}

impl miette::Diagnostic for SourceError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn miette::Diagnostic> + 'a>> {
        if self.sub_errors.is_empty() {
            return None;
        }
        Some(Box::new(
            self.sub_errors.iter().map(|sub| sub as &dyn miette::Diagnostic),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    fn at(line_text: &str) -> Position {
        Position::location("f.dp").after(line_text)
    }

    #[test]
    fn test_render_without_path() {
        let err = SourceError::lexical(Position::location(""), "illegal token");
        assert_eq!(err.to_string(), "0001:001: illegal token");
    }

    #[test]
    fn test_render_unknown_position() {
        let err = SourceError::syntax(Position::default(), "syntax error");
        assert_eq!(err.to_string(), "syntax error");
    }

    #[test]
    fn test_render_nested_sub_errors() {
        let inner = SourceError::syntax(at("ab"), "name expected");
        let middle = SourceError::syntax(at("a"), "syntax error").with_sub_errors(vec![inner]);
        let other = SourceError::syntax(at(""), "import keyword expected");
        let err = SourceError::syntax(at(""), "syntax error").with_sub_errors(vec![middle, other]);

        insta::assert_snapshot!(err.to_string(), @r"
        f.dp:0001:001: syntax error:
        f.dp:0001:002:   syntax error:
        f.dp:0001:003:     name expected
        f.dp:0001:001:   import keyword expected
        ");
    }

    #[test]
    fn test_accessors() {
        let err = SourceError::encoding(at("\n"), "invalid UTF-8 encoding");
        assert_eq!(err.kind(), ErrorKind::Encoding);
        assert_eq!(err.message(), "invalid UTF-8 encoding");
        assert_eq!(err.position().line, 2);
        assert!(err.sub_errors().is_empty());
    }

    #[test]
    fn test_diagnostic_code_and_related() {
        let err = SourceError::syntax(at(""), "syntax error")
            .with_sub_errors(vec![SourceError::syntax(at(""), "a"), SourceError::syntax(at(""), "b")]);
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("dp::syntax"));
        assert_eq!(err.related().map(|r| r.count()), Some(2));
    }
}
