/// Choice points and list grammars.
///
/// Two list shapes recur throughout the grammar:
/// - **naked lists**: comma-separated on one logical line, ended by a statement-level token
///   that is left unconsumed;
/// - **delimited lists**: between an opening token (consumed by the caller) and its closing
///   token, with newlines and comments allowed as members.
///
/// List rules return `Option<T>`: separators produce `None` and are dropped.
impl<'a> Parser<'a> {
    // ========================================================================
    // Combinators
    // ========================================================================

    /// Try `rules` in order on copies of the cursor and commit the first success.
    fn first_of<T>(&mut self, rules: &[Rule<'a, T>]) -> PResult<T> {
        let mut failures = Vec::with_capacity(rules.len());

        for rule in rules {
            let mut attempt = self.clone();
            match rule(&mut attempt) {
                Ok(node) => {
                    *self = attempt;
                    return Ok(node);
                }
                Err(err) => failures.push(err),
            }
        }

        if failures.len() == 1 {
            if let Some(err) = failures.pop() {
                return Err(err);
            }
        }

        Err(self.error("syntax error").with_sub_errors(failures))
    }

    /// Parse list members until `stop`.
    fn list_until<T>(&mut self, stop: StopAt, rules: &[Rule<'a, Option<T>>]) -> PResult<Vec<T>> {
        let mut items = Vec::new();

        loop {
            let done = match stop {
                StopAt::Eof => self.at_eof(),
                StopAt::Token(kind) => self.skip(kind),
            };
            if done {
                return Ok(items);
            }

            if let Some(item) = self.first_of(rules)? {
                items.push(item);
            }
        }
    }

    /// Parse a single-line list. `extra_stop` adds a context-specific terminator such as `=`.
    fn naked_list<T>(&mut self, extra_stop: Option<TokenKind>, rules: &[Rule<'a, Option<T>>]) -> PResult<Vec<T>> {
        let mut items = Vec::new();

        loop {
            match self.peek_kind() {
                None => return Ok(items),
                Some(kind) if ends_naked_list(kind) || Some(kind) == extra_stop => return Ok(items),
                Some(_) => {}
            }

            if let Some(item) = self.first_of(rules)? {
                items.push(item);
            }
        }
    }

    // --- list separators -------------------------------------------------------

    fn comma<T>(&mut self) -> PResult<Option<T>> {
        self.take(punct(PunctuationId::Comma), "comma expected")?;
        Ok(None)
    }

    fn newline_item<T>(&mut self) -> PResult<Option<T>> {
        self.take(NEWLINE, "end of line expected")?;
        Ok(None)
    }

    fn semicolon_item<T>(&mut self) -> PResult<Option<T>> {
        self.take(punct(PunctuationId::Semicolon), "semicolon expected")?;
        Ok(None)
    }

    fn comment(&mut self) -> PResult<Comment> {
        let token = self.take(COMMENT, "comment expected")?;
        Ok(Comment {
            pos: token.position.clone(),
            source: token.text.clone(),
        })
    }

    fn comment_item<T: From<Comment>>(&mut self) -> PResult<Option<T>> {
        Ok(Some(self.comment()?.into()))
    }
}

/// Tokens that end a naked list.
fn ends_naked_list(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Comment
            | TokenKind::Newline
            | TokenKind::Punctuation(
                PunctuationId::LBrace
                    | PunctuationId::RBrace
                    | PunctuationId::Colon
                    | PunctuationId::ColonEq
                    | PunctuationId::Semicolon
            )
    )
}
