/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] cursor, the rule signature shared by every grammar method,
/// and the file-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
type PResult<T> = Result<T, SourceError>;

/// A grammar rule: parse one thing at the cursor, or fail without committing.
type Rule<'a, T> = fn(&mut Parser<'a>) -> PResult<T>;

/// Deepest nesting of blocks, atomic expressions and array types the parser accepts.
///
/// Nesting is parsed recursively; the limit keeps hostile input from exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 100;

const NEWLINE: TokenKind = TokenKind::Newline;
const COMMENT: TokenKind = TokenKind::Comment;
const WORD: TokenKind = TokenKind::Word;

const fn punct(id: PunctuationId) -> TokenKind {
    TokenKind::Punctuation(id)
}

const fn keyword(id: KeywordId) -> TokenKind {
    TokenKind::Keyword(id)
}

const fn operator(id: OperatorId) -> TokenKind {
    TokenKind::Operator(id)
}

/// Where a delimited list ends.
#[derive(Debug, Clone, Copy)]
enum StopAt {
    Eof,
    /// Closing token, consumed when reached.
    Token(TokenKind),
}

/// Parser cursor.
///
/// ## Notes
/// - Cloning is cheap: the tokens are borrowed and only the `last` position is owned.
/// - `depth` counts the nesting levels entered on the way to the cursor.
/// - `last` is where the most recently consumed token's node ends: the start of the next
///   non-space token, or the consumed token's end at the end of input.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    tokens: &'a [Token],
    last: Position,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `dp_syntax::lexer`, spaces included.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            last: Position::default(),
            depth: 0,
        }
    }

    /// Parse the entire token stream into file-level items.
    ///
    /// ## Errors
    /// Returns the first [`SourceError`]; no partial result is produced.
    pub fn parse(mut self) -> PResult<Vec<FileItem>> {
        self.list_until(
            StopAt::Eof,
            &[
                Self::comment_item,
                Self::constant_def,
                Self::function_def,
                Self::imports,
                Self::newline_item,
                Self::semicolon_item,
                Self::type_def,
            ],
        )
    }
}
