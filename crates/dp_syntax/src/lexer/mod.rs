//! Lexer for the dp language.
//!
//! Splits source text into a flat sequence of [`Token`]s. At each offset an ordered list of
//! recognizer rules is tried and the first rule that matches wins:
//!
//! 1. whitespace run (newline excluded), newline, `//` comment to end of line
//! 2. each reserved keyword, unless the next character continues a word
//! 3. word, integer, `'…'` character, `"…"` or `` `…` `` string
//! 4. operator and punctuation symbols, longest spelling first (`&^` before `&`, `::` before `:`)
//!
//! ## Notes
//! - Whitespace and comments are kept as tokens; the parser skips spaces and the formatter reads
//!   comments.
//! - Inside quoted literals a backslash consumes the following character verbatim. Escapes are
//!   not interpreted.
//! - Input that matches no rule is an "illegal token" error. Invalid UTF-8 is an encoding error
//!   reported by [`tokenize_bytes`].
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)

pub mod tokens;

pub use tokens::{Token, TokenKind};

use std::cmp::Reverse;

use crate::diagnostics::SourceError;
use crate::source::Position;
use dp_core::lang::keywords::{self, KeywordId};
use dp_core::lang::operators::OPERATORS;
use dp_core::lang::punctuation::PUNCTUATION;

/// Tokenize `text`, numbering positions from `start`.
///
/// ## Errors
/// - "illegal token" at the first offset where no rule matches.
///
/// ## Examples
/// ```rust
/// use dp_syntax::lexer::{self, TokenKind};
/// use dp_syntax::source::Position;
///
/// let tokens = lexer::tokenize(Position::location("a.dp"), "x := 1").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind.to_string()).collect();
/// assert_eq!(kinds, ["Word", "Space", ":=", "Space", "Integer"]);
/// ```
#[tracing::instrument(skip_all, fields(source_len = text.len()))]
pub fn tokenize(start: Position, text: &str) -> Result<Vec<Token>, SourceError> {
    let tokens = Lexer::new(start, text).tokenize()?;
    tracing::debug!(token_count = tokens.len(), "tokenized");
    Ok(tokens)
}

/// Tokenize raw bytes, rejecting invalid UTF-8.
///
/// ## Errors
/// - "invalid UTF-8 encoding" at the position of the first invalid byte.
/// - Any error of [`tokenize`].
pub fn tokenize_bytes(start: Position, bytes: &[u8]) -> Result<Vec<Token>, SourceError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => tokenize(start, text),
        Err(err) => {
            let valid = std::str::from_utf8(&bytes[..err.valid_up_to()]).unwrap_or_default();
            Err(SourceError::encoding(start.after(valid), "invalid UTF-8 encoding"))
        }
    }
}

// ============================================================================
// RULES
// ============================================================================

/// Token recognizer, tried at the current offset.
#[derive(Debug, Clone, Copy)]
enum Rule {
    Space,
    Newline,
    Comment,
    Keyword(KeywordId),
    Word,
    Integer,
    Quoted(char, TokenKind),
    Symbol(&'static str, TokenKind),
}

impl Rule {
    fn kind(self) -> TokenKind {
        match self {
            Rule::Space => TokenKind::Space,
            Rule::Newline => TokenKind::Newline,
            Rule::Comment => TokenKind::Comment,
            Rule::Keyword(id) => TokenKind::Keyword(id),
            Rule::Word => TokenKind::Word,
            Rule::Integer => TokenKind::Integer,
            Rule::Quoted(_, kind) | Rule::Symbol(_, kind) => kind,
        }
    }

    /// Byte length of the match at the start of `rest`, if any.
    fn matches(self, rest: &str) -> Option<usize> {
        let len = match self {
            Rule::Space => prefix_len(rest, |c| c.is_whitespace() && c != '\n'),
            Rule::Newline => usize::from(rest.starts_with('\n')),
            Rule::Comment => {
                if !rest.starts_with("//") {
                    return None;
                }
                rest.find('\n').unwrap_or(rest.len())
            }
            Rule::Keyword(id) => {
                let spelling = keywords::as_str(id);
                let tail = rest.strip_prefix(spelling)?;
                if tail.chars().next().is_some_and(continues_word) {
                    return None;
                }
                spelling.len()
            }
            Rule::Word => {
                let first = rest.chars().next().filter(|&c| starts_word(c))?;
                first.len_utf8() + prefix_len(&rest[first.len_utf8()..], continues_word)
            }
            Rule::Integer => prefix_len(rest, |c| c.is_ascii_digit()),
            Rule::Quoted(quote, _) => quoted_len(rest, quote)?,
            Rule::Symbol(spelling, _) => {
                if !rest.starts_with(spelling) {
                    return None;
                }
                spelling.len()
            }
        };
        (len > 0).then_some(len)
    }
}

fn starts_word(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn continues_word(c: char) -> bool {
    starts_word(c) || c.is_ascii_digit()
}

fn prefix_len(text: &str, pred: impl Fn(char) -> bool) -> usize {
    text.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(text.len(), |(i, _)| i)
}

/// Length of a quoted literal including both quotes; `None` when unterminated.
fn quoted_len(rest: &str, quote: char) -> Option<usize> {
    let mut chars = rest.char_indices();
    if chars.next()?.1 != quote {
        return None;
    }
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next()?;
        } else if c == quote {
            return Some(i + c.len_utf8());
        }
    }
    None
}

/// Build the ordered rule list.
fn rules() -> Vec<Rule> {
    let mut rules = vec![Rule::Space, Rule::Newline, Rule::Comment];
    rules.extend(keywords::KEYWORDS.iter().map(|k| Rule::Keyword(k.id)));
    rules.extend([
        Rule::Word,
        Rule::Integer,
        Rule::Quoted('\'', TokenKind::Character),
        Rule::Quoted('"', TokenKind::String),
        Rule::Quoted('`', TokenKind::String),
    ]);

    let mut symbols: Vec<(&'static str, TokenKind)> = OPERATORS
        .iter()
        .map(|o| (o.canonical, TokenKind::Operator(o.id)))
        .chain(
            PUNCTUATION
                .iter()
                .map(|p| (p.canonical, TokenKind::Punctuation(p.id))),
        )
        .collect();
    symbols.sort_by_key(|(spelling, _)| Reverse(spelling.len()));
    rules.extend(symbols.into_iter().map(|(spelling, kind)| Rule::Symbol(spelling, kind)));
    rules
}

// ============================================================================
// LEXER STATE
// ============================================================================

/// Lexer over one source text.
pub struct Lexer<'a> {
    text: &'a str,
    offset: usize,
    position: Position,
    rules: Vec<Rule>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer; `start` is the position of the first character of `text`.
    pub fn new(start: Position, text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            position: start,
            rules: rules(),
        }
    }

    /// Tokenize the entire text.
    ///
    /// ## Errors
    /// - "illegal token" at the first offset where no rule matches.
    pub fn tokenize(mut self) -> Result<Vec<Token>, SourceError> {
        let mut tokens = Vec::new();
        while self.offset < self.text.len() {
            tokens.push(self.next_token()?);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, SourceError> {
        let rest = &self.text[self.offset..];
        let Some((rule, len)) = self
            .rules
            .iter()
            .find_map(|&rule| rule.matches(rest).map(|len| (rule, len)))
        else {
            return Err(SourceError::lexical(self.position.clone(), "illegal token"));
        };

        let text = &rest[..len];
        let token = Token::new(rule.kind(), text, self.position.clone());
        self.position = self.position.after(text);
        self.offset += len;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dp_core::lang::operators::OperatorId;
    use dp_core::lang::punctuation::PunctuationId;

    fn lex(text: &str) -> Vec<Token> {
        tokenize(Position::location("t.dp"), text).unwrap()
    }

    fn kinds(text: &str) -> Vec<TokenKind> {
        lex(text).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(lex("").is_empty());
    }

    #[test]
    fn test_keyword_guarded_against_longer_word() {
        assert_eq!(kinds("for"), vec![TokenKind::Keyword(KeywordId::For)]);
        assert_eq!(kinds("format"), vec![TokenKind::Word]);
        assert_eq!(kinds("if_"), vec![TokenKind::Word]);
        assert_eq!(kinds("nil2"), vec![TokenKind::Word]);
        assert_eq!(
            kinds("return("),
            vec![
                TokenKind::Keyword(KeywordId::Return),
                TokenKind::Punctuation(PunctuationId::LParen)
            ]
        );
    }

    #[test]
    fn test_longest_symbol_wins() {
        assert_eq!(
            kinds("&^&&&"),
            vec![
                TokenKind::Operator(OperatorId::AmpCaret),
                TokenKind::Operator(OperatorId::AndAnd),
                TokenKind::Operator(OperatorId::Amp),
            ]
        );
        assert_eq!(
            kinds(":=::"),
            vec![
                TokenKind::Punctuation(PunctuationId::ColonEq),
                TokenKind::Punctuation(PunctuationId::ColonColon),
            ]
        );
        assert_eq!(
            kinds("<<=<"),
            vec![
                TokenKind::Operator(OperatorId::LtLt),
                TokenKind::Punctuation(PunctuationId::Eq),
                TokenKind::Operator(OperatorId::Lt),
            ]
        );
    }

    #[test]
    fn test_comment_stops_before_newline() {
        let tokens = lex("x // note \ny");
        assert_eq!(tokens[2].kind, TokenKind::Comment);
        assert_eq!(tokens[2].text, "// note ");
        assert_eq!(tokens[3].kind, TokenKind::Newline);
        assert_eq!(tokens[4].position.line, 2);
    }

    #[test]
    fn test_whitespace_run_excludes_newline() {
        let tokens = lex(" \t\r\n ");
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec![" \t\r", "\n", " "]);
    }

    #[test]
    fn test_quoted_literals_keep_escapes_verbatim() {
        let tokens = lex(r#""a\"b" 'x' `c\`d`"#);
        assert_eq!(tokens[0].text, r#""a\"b""#);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[2].kind, TokenKind::Character);
        assert_eq!(tokens[4].text, r"`c\`d`");
    }

    #[test]
    fn test_unterminated_string_is_illegal() {
        let err = tokenize(Position::location("t.dp"), "x = \"abc").unwrap_err();
        assert_eq!(err.message(), "illegal token");
        assert_eq!(err.position().column, 5);
    }

    #[test]
    fn test_illegal_character() {
        let err = tokenize(Position::location("t.dp"), "a\n  $").unwrap_err();
        assert_eq!(err.to_string(), "t.dp:0002:003: illegal token");
    }

    #[test]
    fn test_unicode_words_and_positions() {
        let tokens = lex("ä1 22");
        assert_eq!(tokens[0].kind, TokenKind::Word);
        assert_eq!(tokens[0].text, "ä1");
        assert_eq!(tokens[2].kind, TokenKind::Integer);
        assert_eq!(tokens[2].position.column, 4);
        assert_eq!(tokens[2].position.byte_offset, 4);
    }

    #[test]
    fn test_only_decimal_digits_are_numeric() {
        let tokens = lex("x1 09");
        assert_eq!(tokens[0].text, "x1");
        assert_eq!(tokens[2].kind, TokenKind::Integer);
        assert_eq!(tokens[2].text, "09");

        let err = tokenize(Position::location("t.dp"), "x = ½").unwrap_err();
        assert_eq!(err.message(), "illegal token");
        assert_eq!(err.position().column, 5);

        let err = tokenize(Position::location("t.dp"), "x² = 1").unwrap_err();
        assert_eq!(err.position().column, 2);
    }

    #[test]
    fn test_token_end_position() {
        let tokens = lex("abc");
        let end = tokens[0].end_position();
        assert_eq!((end.line, end.column), (1, 4));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = tokenize_bytes(Position::location("t.dp"), b"ab\n\xffc").unwrap_err();
        assert_eq!(err.kind(), crate::diagnostics::ErrorKind::Encoding);
        assert_eq!(err.to_string(), "t.dp:0002:001: invalid UTF-8 encoding");
    }

    #[test]
    fn test_tokens_reassemble_source() {
        let source = "f(a, b int) (x T) {\n\treturn a+b // sum\n}\n";
        let joined: String = lex(source).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, source);
    }
}
