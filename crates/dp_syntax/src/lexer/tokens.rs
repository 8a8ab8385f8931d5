//! Token types for the dp lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - Tokens keep their exact source text, including whitespace and comments. The formatter
//!   relies on comments being real tokens.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use std::fmt;

use crate::source::Position;
use dp_core::lang::keywords::{self, KeywordId};
use dp_core::lang::operators::{self, OperatorId};
use dp_core::lang::punctuation::{self, PunctuationId};

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Layout ==========
    /// Run of whitespace other than newline.
    Space,
    Newline,
    /// `//` up to (not including) the end of the line.
    Comment,

    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    /// Identifier or contextual keyword such as `pub`.
    Word,
    Integer,
    Character,
    /// Double-quoted or backquoted string.
    String,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Space => f.write_str("Space"),
            TokenKind::Newline => f.write_str("Newline"),
            TokenKind::Comment => f.write_str("Comment"),
            TokenKind::Keyword(id) => f.write_str(keywords::as_str(*id)),
            TokenKind::Operator(id) => f.write_str(operators::as_str(*id)),
            TokenKind::Punctuation(id) => f.write_str(punctuation::as_str(*id)),
            TokenKind::Word => f.write_str("Word"),
            TokenKind::Integer => f.write_str("Integer"),
            TokenKind::Character => f.write_str("Character"),
            TokenKind::String => f.write_str("String"),
        }
    }
}

/// A token with its kind, exact source text and start position.
///
/// ## Notes
/// - `text` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Position just past the token's text.
    pub fn end_position(&self) -> Position {
        self.position.after(&self.text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {:?}", self.position, self.kind, self.text)
    }
}
