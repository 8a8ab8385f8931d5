/// Token-stream helpers.
///
/// Low-level primitives used throughout parsing: peeking past spaces, consuming expected
/// tokens, and position bookkeeping.
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Drop leading space tokens. `last` is not updated.
    fn skip_space(&mut self) {
        let tokens: &'a [Token] = self.tokens;
        let start = tokens
            .iter()
            .position(|t| t.kind != TokenKind::Space)
            .unwrap_or(tokens.len());
        self.tokens = &tokens[start..];
    }

    /// Return the next non-space token without consuming it.
    fn peek(&mut self) -> Option<&'a Token> {
        self.skip_space();
        let tokens: &'a [Token] = self.tokens;
        tokens.first()
    }

    fn peek_kind(&mut self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn check(&mut self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn at_eof(&mut self) -> bool {
        self.peek().is_none()
    }

    /// Position of the next non-space token, or `last` at the end of input.
    fn pos(&self) -> Position {
        self.tokens
            .iter()
            .find(|t| t.kind != TokenKind::Space)
            .map_or_else(|| self.last.clone(), |t| t.position.clone())
    }

    /// End position of the most recently consumed token.
    fn last(&self) -> Position {
        self.last.clone()
    }

    /// Consume and return the next token if it has the wanted kind.
    fn skim(&mut self, wanted: TokenKind) -> Option<&'a Token> {
        if !self.check(wanted) {
            return None;
        }
        let tokens: &'a [Token] = self.tokens;
        let (token, rest) = tokens.split_first()?;
        self.tokens = rest;
        self.last = match rest.iter().find(|t| t.kind != TokenKind::Space) {
            Some(next) => next.position.clone(),
            None => token.end_position(),
        };
        Some(token)
    }

    fn skip(&mut self, wanted: TokenKind) -> bool {
        self.skim(wanted).is_some()
    }

    /// Consume a token of the wanted kind or fail with `message` at the current position.
    fn take(&mut self, wanted: TokenKind, message: &str) -> PResult<&'a Token> {
        match self.skim(wanted) {
            Some(token) => Ok(token),
            None => Err(self.error(message)),
        }
    }

    fn skip_newlines(&mut self) {
        while self.skip(NEWLINE) {}
    }

    fn error(&self, message: &str) -> SourceError {
        SourceError::syntax(self.pos(), message)
    }

    /// Run `rule` one nesting level deeper.
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }
}
