//! Define the reserved keyword vocabulary for the dp language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings
//! and categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Contextual words such as `pub` or `visible` are *not* reserved; they lex as plain words and
//!   live in [`crate::lang::access`].
//!
//! ## Examples
//! ```rust
//! use dp_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("clone"), Some(KeywordId::Clone));
//! assert_eq!(keywords::as_str(KeywordId::Auto), "auto");
//! assert_eq!(keywords::from_str("pub"), None);
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeywordId {
    Auto,
    Break,
    Clone,
    Continue,
    Else,
    False,
    For,
    If,
    Import,
    Nil,
    Return,
    True,
}

/// High-level grouping for documentation and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Declaration,
    Expression,
    Literal,
}

/// Metadata for a reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub description: &'static str,
}

/// Registry of every reserved keyword, in lexer rule order.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(
        KeywordId::Auto,
        "auto",
        KeywordCategory::Declaration,
        "Inferred type in a variable declaration.",
    ),
    info(
        KeywordId::Break,
        "break",
        KeywordCategory::ControlFlow,
        "Leave the innermost loop.",
    ),
    info(
        KeywordId::Clone,
        "clone",
        KeywordCategory::Expression,
        "Copy the value of its operand.",
    ),
    info(
        KeywordId::Continue,
        "continue",
        KeywordCategory::ControlFlow,
        "Start the next iteration of the innermost loop.",
    ),
    info(
        KeywordId::Else,
        "else",
        KeywordCategory::ControlFlow,
        "Alternative block of an `if` statement.",
    ),
    info(KeywordId::False, "false", KeywordCategory::Literal, "Boolean false."),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow, "Loop statement."),
    info(KeywordId::If, "if", KeywordCategory::ControlFlow, "Conditional statement."),
    info(
        KeywordId::Import,
        "import",
        KeywordCategory::Declaration,
        "Import declaration, at file level or inside a body.",
    ),
    info(KeywordId::Nil, "nil", KeywordCategory::Literal, "The nil value."),
    info(
        KeywordId::Return,
        "return",
        KeywordCategory::ControlFlow,
        "Leave the current function with optional values.",
    ),
    info(KeywordId::True, "true", KeywordCategory::Literal, "Boolean true."),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is reserved.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    description: &'static str,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(from_str("return"), Some(KeywordId::Return));
        assert_eq!(from_str("Return"), None);
    }

    #[test]
    fn test_literal_keywords() {
        for id in [KeywordId::True, KeywordId::False, KeywordId::Nil] {
            assert_eq!(category(id), KeywordCategory::Literal);
        }
    }

    #[test]
    fn test_table_is_sorted() {
        let spellings: Vec<_> = KEYWORDS.iter().map(|k| k.canonical).collect();
        let mut sorted = spellings.clone();
        sorted.sort_unstable();
        assert_eq!(spellings, sorted);
    }
}
