/// Expression parsing.
///
/// ## Notes
/// - Operands are atomic expressions: literals, calls, indexing, selectors, `&`/`*`/`clone`
///   and prefix operators applied to another atomic expression, or a parenthesized expression.
/// - Binary chains are left-associative. Operators of the multiplicative tier bind tighter than
///   every other tier; apart from that, one chain may only use operators of a single tier.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    /// Expression statement, which must be followed by a statement terminator.
    fn expression_stmt(&mut self) -> PResult<Option<Stmt>> {
        let expr = self.any_expr(false)?;

        if !self.peek_kind().is_some_and(|kind| kind.ends_statement()) {
            return Err(self.error("expression: end of statement expected"));
        }

        Ok(Some(Expression { expr }.into()))
    }

    /// Value list member, consuming a trailing comma.
    ///
    /// `(name)` is an assigner dereference only when the member ends right after it; `(a) - b`
    /// is an ordinary expression.
    fn list_value(&mut self) -> PResult<Option<ExprListItem>> {
        let mut attempt = self.clone();
        if let Some(deref) = attempt.assigner_dereference() {
            if attempt.end_of_list_value() {
                *self = attempt;
                return Ok(Some(deref.into()));
            }
        }

        let expr = self.any_expr(false)?;

        if !self.end_of_list_value() {
            return Err(self.error("end of expression expected"));
        }

        Ok(Some(Expression { expr }.into()))
    }

    /// Skip the comma after a list member, or check that the list ends here.
    fn end_of_list_value(&mut self) -> bool {
        if self.skip(punct(PunctuationId::Comma)) {
            return true;
        }
        matches!(
            self.peek_kind(),
            None | Some(TokenKind::Comment | TokenKind::Newline)
                | Some(TokenKind::Punctuation(
                    PunctuationId::RBrace | PunctuationId::RParen | PunctuationId::Semicolon,
                ))
        )
    }

    /// Binary chain; `multiline` allows line breaks around operands (inside brackets).
    fn any_expr(&mut self, multiline: bool) -> PResult<Expr> {
        let mut left = self.product(multiline)?;
        let mut tier = None;

        loop {
            if multiline {
                self.skip_newlines();
            }

            let Some(op) = self.infix_operator() else {
                return Ok(left);
            };

            if tier.is_some_and(|tier| tier != op.precedence()) {
                return Err(self.error("operators have different precedence"));
            }
            tier = Some(op.precedence());

            let right = self.product(multiline)?;
            left = Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                end: self.last(),
            }
            .into();
        }
    }

    /// Chain of atomic expressions joined by maximum-tier operators.
    fn product(&mut self, multiline: bool) -> PResult<Expr> {
        if multiline {
            self.skip_newlines();
        }

        let mut left = self.atomic_expr()?;

        loop {
            let mut ahead = self.clone();
            if multiline {
                ahead.skip_newlines();
            }

            let Some(op) = ahead.peek_binary_operator() else {
                return Ok(left);
            };
            if op.precedence() != MAX_BINARY_PRECEDENCE {
                return Ok(left);
            }

            *self = ahead;
            self.skip(operator(op.operator()));
            if multiline {
                self.skip_newlines();
            }

            let right = self.atomic_expr()?;
            left = Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                end: self.last(),
            }
            .into();
        }
    }

    fn peek_binary_operator(&mut self) -> Option<BinaryOp> {
        self.peek_kind()
            .and_then(|kind| kind.operator_id())
            .and_then(BinaryOp::from_operator)
    }

    fn infix_operator(&mut self) -> Option<BinaryOp> {
        let op = self.peek_binary_operator()?;
        self.skip(operator(op.operator()));
        Some(op)
    }

    fn atomic_expr(&mut self) -> PResult<Expr> {
        self.nested(|p| {
            p.first_of(&[
                Self::address,
                Self::call_expr,
                Self::character,
                Self::clone_expr,
                Self::false_literal,
                Self::index_expr,
                Self::integer,
                Self::nil,
                Self::parenthesized,
                Self::pointer_dereference,
                Self::selector_expr,
                Self::string_literal,
                Self::true_literal,
                Self::unary,
                Self::zero,
            ])
        })
    }

    // --- atoms -----------------------------------------------------------------

    fn address(&mut self) -> PResult<Expr> {
        let token = self.take(operator(OperatorId::Amp), "address operator expected")?;
        let expr = self.atomic_expr()?;
        Ok(Address {
            pos: token.position.clone(),
            expr: Box::new(expr),
            end: self.last(),
        }
        .into())
    }

    /// `(name)`; the cursor is left untouched when it does not match.
    fn assigner_dereference(&mut self) -> Option<AssignerDereference> {
        let mut attempt = self.clone();
        let pos = attempt.pos();

        if !attempt.skip(punct(PunctuationId::LParen)) {
            return None;
        }
        let name = attempt.skim(WORD)?;
        if !attempt.skip(punct(PunctuationId::RParen)) {
            return None;
        }

        *self = attempt;
        Some(AssignerDereference {
            pos,
            name: name.text.clone(),
            end: self.last(),
        })
    }

    fn call(&mut self, rules: &[Rule<'a, Option<ExprListItem>>]) -> PResult<Call> {
        let name = self.selector_only()?;
        self.take(punct(PunctuationId::LParen), "call: opening paren expected")?;
        let args = self.list_until(StopAt::Token(punct(PunctuationId::RParen)), rules)?;
        Ok(Call {
            name,
            args,
            end: self.last(),
        })
    }

    fn call_expr(&mut self) -> PResult<Expr> {
        let call = self.call(&[Self::comma, Self::comment_item, Self::list_value, Self::newline_item])?;
        Ok(call.into())
    }

    fn character(&mut self) -> PResult<Expr> {
        let token = self.take(TokenKind::Character, "character literal expected")?;
        Ok(Character {
            pos: token.position.clone(),
            source: token.text.clone(),
            end: self.last(),
        }
        .into())
    }

    fn clone_expr(&mut self) -> PResult<Expr> {
        let token = self.take(keyword(KeywordId::Clone), "clone keyword expected")?;
        let expr = self.atomic_expr()?;
        Ok(CloneExpr {
            pos: token.position.clone(),
            expr: Box::new(expr),
            end: self.last(),
        }
        .into())
    }

    fn false_literal(&mut self) -> PResult<Expr> {
        let token = self.take(keyword(KeywordId::False), "literal false expected")?;
        Ok(Boolean {
            pos: token.position.clone(),
            value: false,
            end: self.last(),
        }
        .into())
    }

    fn index(&mut self) -> PResult<Index> {
        let name = self.selector_only()?;
        self.take(punct(PunctuationId::LBracket), "index: opening bracket expected")?;
        let index = self.any_expr(true)?;
        self.take(punct(PunctuationId::RBracket), "index: closing bracket expected")?;
        Ok(Index {
            name,
            index: Box::new(index),
            end: self.last(),
        })
    }

    fn index_expr(&mut self) -> PResult<Expr> {
        Ok(self.index()?.into())
    }

    fn integer(&mut self) -> PResult<Expr> {
        let token = self.take(TokenKind::Integer, "integer literal expected")?;
        Ok(Integer {
            pos: token.position.clone(),
            source: token.text.clone(),
            end: self.last(),
        }
        .into())
    }

    fn nil(&mut self) -> PResult<Expr> {
        let token = self.take(keyword(KeywordId::Nil), "literal nil expected")?;
        Ok(Nil {
            pos: token.position.clone(),
            end: self.last(),
        }
        .into())
    }

    fn parenthesized(&mut self) -> PResult<Expr> {
        self.take(punct(PunctuationId::LParen), "expression: opening paren expected")?;
        let expr = self.any_expr(true)?;
        self.take(punct(PunctuationId::RParen), "expression: closing paren expected")?;
        Ok(expr)
    }

    fn pointer_dereference(&mut self) -> PResult<Expr> {
        let token = self.take(operator(OperatorId::Star), "pointer dereference operator expected")?;
        let expr = self.atomic_expr()?;
        Ok(PointerDereference {
            pos: token.position.clone(),
            expr: Box::new(expr),
            end: self.last(),
        }
        .into())
    }

    /// Dotted name without any check of what follows.
    fn selector_only(&mut self) -> PResult<Selector> {
        let pos = self.pos();
        let mut names = vec![self.take(WORD, "selector: variable name expected")?.text.clone()];

        while self.skip(punct(PunctuationId::Dot)) {
            names.push(self.take(WORD, "selector: field name expected")?.text.clone());
        }

        Ok(Selector {
            pos,
            names,
            end: self.last(),
        })
    }

    /// Dotted name that is not the start of a namespace, call or index.
    fn selector(&mut self) -> PResult<Selector> {
        let selector = self.selector_only()?;

        let message = match self.peek_kind() {
            Some(TokenKind::Punctuation(PunctuationId::ColonColon)) => "selector: looks like namespace",
            Some(TokenKind::Punctuation(PunctuationId::LParen)) => "selector used in function call",
            Some(TokenKind::Punctuation(PunctuationId::LBracket)) => "selector: looks like index expression",
            _ => return Ok(selector),
        };
        Err(self.error(message))
    }

    fn selector_expr(&mut self) -> PResult<Expr> {
        Ok(self.selector()?.into())
    }

    fn string_literal(&mut self) -> PResult<Expr> {
        let token = self.take(TokenKind::String, "string literal expected")?;
        Ok(StringLiteral {
            pos: token.position.clone(),
            source: token.text.clone(),
            end: self.last(),
        }
        .into())
    }

    fn true_literal(&mut self) -> PResult<Expr> {
        let token = self.take(keyword(KeywordId::True), "literal true expected")?;
        Ok(Boolean {
            pos: token.position.clone(),
            value: true,
            end: self.last(),
        }
        .into())
    }

    fn unary(&mut self) -> PResult<Expr> {
        let pos = self.pos();
        let op = self
            .peek_kind()
            .and_then(|kind| kind.operator_id())
            .and_then(UnaryOp::from_operator)
            .ok_or_else(|| self.error("prefix operator expected"))?;
        self.skip(operator(op.operator()));

        let expr = self.atomic_expr()?;
        Ok(Unary {
            pos,
            op,
            expr: Box::new(expr),
            end: self.last(),
        }
        .into())
    }

    /// `{}`
    fn zero(&mut self) -> PResult<Expr> {
        let token = self.take(punct(PunctuationId::LBrace), "zero: opening brace expected")?;
        self.take(punct(PunctuationId::RBrace), "zero: closing brace expected")?;
        Ok(Zero {
            pos: token.position.clone(),
            end: self.last(),
        }
        .into())
    }

    // --- assignment targets ----------------------------------------------------

    fn assigner_dereference_target(&mut self) -> PResult<Option<AssignTarget>> {
        match self.assigner_dereference() {
            Some(deref) => Ok(Some(deref.into())),
            None => Err(self.error("assigner dereference expected")),
        }
    }

    /// Call target; its arguments may not carry comments.
    fn call_target(&mut self) -> PResult<Option<AssignTarget>> {
        let call = self.call(&[Self::comma, Self::list_value, Self::newline_item])?;
        Ok(Some(call.into()))
    }

    fn index_target(&mut self) -> PResult<Option<AssignTarget>> {
        Ok(Some(self.index()?.into()))
    }

    fn selector_target(&mut self) -> PResult<Option<AssignTarget>> {
        Ok(Some(self.selector()?.into()))
    }
}
