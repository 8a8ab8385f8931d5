//! Punctuation vocabulary.
//!
//! This module defines the non-operator symbols used by the lexer and parser: delimiters,
//! separators, binding markers and the `#` shared-type flag.
//!
//! ## Notes
//! - Lookup via [`from_str`] is exact.
//! - This module is vocabulary only (spellings + metadata). It does not tokenize source text.
//!
//! ## Examples
//! ```rust
//! use dp_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("::"), Some(PunctuationId::ColonColon));
//! assert_eq!(punctuation::as_str(PunctuationId::ColonEq), ":=");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `,` and `;`.
    Separator,
    /// Access/path markers like `.` and `::`.
    Access,
    /// Binding markers like `=`, `:=` and `:`.
    Binding,
    /// Type markers like `#`.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PunctuationId {
    // Binding
    Eq,
    ColonEq,
    Colon,

    // Separators
    Comma,
    Semicolon,

    // Access / path
    Dot,
    ColonColon,

    // Markers
    Hash,

    // Delimiters
    LParen,
    LBracket,
    LBrace,
    RParen,
    RBracket,
    RBrace,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
}

/// Registry of every punctuation token.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Eq, "=", PunctuationCategory::Binding),
    info(PunctuationId::ColonEq, ":=", PunctuationCategory::Binding),
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Dot, ".", PunctuationCategory::Access),
    info(PunctuationId::Semicolon, ";", PunctuationCategory::Separator),
    info(PunctuationId::ColonColon, "::", PunctuationCategory::Access),
    info(PunctuationId::Colon, ":", PunctuationCategory::Binding),
    info(PunctuationId::Hash, "#", PunctuationCategory::Marker),
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
];

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a punctuation spelling to its identifier.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo { id, canonical, category }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiters() {
        for s in ["(", ")", "[", "]", "{", "}"] {
            let id = from_str(s).unwrap();
            assert_eq!(category(id), PunctuationCategory::Delimiter);
        }
    }

    #[test]
    fn test_unknown_symbol() {
        assert_eq!(from_str("->"), None);
    }
}
