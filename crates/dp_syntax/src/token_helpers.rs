//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites.

use crate::lexer::{Token, TokenKind};
use dp_core::lang::operators::OperatorId;
use dp_core::lang::punctuation::PunctuationId;

impl TokenKind {
    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` for tokens that end a statement: comment, newline or `;`.
    pub fn ends_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Comment | TokenKind::Newline | TokenKind::Punctuation(PunctuationId::Semicolon)
        )
    }
}

impl Token {
    /// Return `true` if this is a word token spelled `text`.
    pub fn is_word(&self, text: &str) -> bool {
        self.kind == TokenKind::Word && self.text == text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Position;
    use dp_core::lang::keywords::KeywordId;

    #[test]
    fn test_kind_helpers() {
        assert_eq!(TokenKind::Operator(OperatorId::Plus).operator_id(), Some(OperatorId::Plus));
        assert_eq!(TokenKind::Keyword(KeywordId::Clone).operator_id(), None);
        assert!(TokenKind::Punctuation(PunctuationId::Semicolon).ends_statement());
        assert!(!TokenKind::Word.ends_statement());
    }

    #[test]
    fn test_is_word() {
        let token = Token::new(TokenKind::Word, "pub", Position::location("t.dp"));
        assert!(token.is_word("pub"));
        assert!(!token.is_word("visible"));
    }
}
