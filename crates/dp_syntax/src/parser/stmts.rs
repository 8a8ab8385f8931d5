/// Statement parsing.
///
/// This chunk implements the block grammar: everything between `{` and `}` of a function body,
/// nested block, loop or branch.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    /// Parse statements up to and including the closing brace.
    fn statements(&mut self) -> PResult<Vec<Stmt>> {
        self.nested(|p| {
            p.list_until(
                StopAt::Token(punct(PunctuationId::RBrace)),
                &[
                    Self::assign,
                    Self::block,
                    Self::break_stmt,
                    Self::comment_item,
                    Self::continue_stmt,
                    Self::expression_stmt,
                    Self::for_stmt,
                    Self::if_stmt,
                    Self::import_item,
                    Self::newline_item,
                    Self::return_stmt,
                    Self::semicolon_item,
                    Self::variable_decl,
                    Self::variable_def,
                ],
            )
        })
    }

    /// `targets = values`
    fn assign(&mut self) -> PResult<Option<Stmt>> {
        let objects = self.naked_list(
            Some(punct(PunctuationId::Eq)),
            &[
                Self::assigner_dereference_target,
                Self::call_target,
                Self::comma,
                Self::index_target,
                Self::selector_target,
            ],
        )?;
        let Some(first) = objects.first() else {
            return Err(self.error("assign: empty list"));
        };
        let pos = first.pos().clone();

        self.take(punct(PunctuationId::Eq), "assign: operator expected")?;

        let subjects = self.value_list()?;
        if subjects.is_empty() {
            return Err(self.error("assign: empty list"));
        }

        Ok(Some(
            Assign {
                pos,
                objects,
                subjects,
                end: self.last(),
            }
            .into(),
        ))
    }

    fn block(&mut self) -> PResult<Option<Stmt>> {
        let open = self.take(punct(PunctuationId::LBrace), "block: opening brace expected")?;
        let body = self.statements()?;
        Ok(Some(
            Block {
                pos: open.position.clone(),
                body,
                end: self.last(),
            }
            .into(),
        ))
    }

    fn break_stmt(&mut self) -> PResult<Option<Stmt>> {
        let token = self.take(keyword(KeywordId::Break), "break keyword expected")?;
        Ok(Some(
            Break {
                pos: token.position.clone(),
                end: self.last(),
            }
            .into(),
        ))
    }

    fn continue_stmt(&mut self) -> PResult<Option<Stmt>> {
        let token = self.take(keyword(KeywordId::Continue), "continue keyword expected")?;
        Ok(Some(
            Continue {
                pos: token.position.clone(),
                end: self.last(),
            }
            .into(),
        ))
    }

    /// `for [test] { body }`
    fn for_stmt(&mut self) -> PResult<Option<Stmt>> {
        let token = self.take(keyword(KeywordId::For), "for keyword expected")?;

        let (test, open) = match self.skim(punct(PunctuationId::LBrace)) {
            Some(open) => (None, open),
            None => {
                let test = self.any_expr(false)?;
                let open = self.take(punct(PunctuationId::LBrace), "for: opening brace expected")?;
                (Some(test), open)
            }
        };

        let body = self.statements()?;

        Ok(Some(
            For {
                pos: token.position.clone(),
                test,
                body_pos: open.position.clone(),
                body,
                end: self.last(),
            }
            .into(),
        ))
    }

    /// `if test { then } [else { else }]`
    fn if_stmt(&mut self) -> PResult<Option<Stmt>> {
        let token = self.take(keyword(KeywordId::If), "if keyword expected")?;
        let test = self.any_expr(false)?;

        let then_pos = self
            .take(punct(PunctuationId::LBrace), "if: opening brace expected")?
            .position
            .clone();
        let then_body = self.statements()?;
        let then_end = self.last();

        let mut else_body = Vec::new();
        if self.skip(keyword(KeywordId::Else)) {
            self.take(punct(PunctuationId::LBrace), "else: opening brace expected")?;
            else_body = self.statements()?;
        }

        Ok(Some(
            If {
                pos: token.position.clone(),
                test,
                then_pos,
                then_body,
                then_end,
                else_body,
                end: self.last(),
            }
            .into(),
        ))
    }

    fn return_stmt(&mut self) -> PResult<Option<Stmt>> {
        let token = self.take(keyword(KeywordId::Return), "return keyword expected")?;
        let values = self.value_list()?;
        Ok(Some(
            Return {
                pos: token.position.clone(),
                values,
                end: self.last(),
            }
            .into(),
        ))
    }

    /// `names : Type` or `names : auto`
    fn variable_decl(&mut self) -> PResult<Option<Stmt>> {
        let pos = self.pos();
        let names = self.naked_list(None, &[Self::comma, Self::variable_name])?;

        self.take(punct(PunctuationId::Colon), "variable declaration: colon expected")?;

        let ty = if self.skip(keyword(KeywordId::Auto)) {
            None
        } else {
            Some(self.type_spec()?)
        };

        Ok(Some(
            VariableDecl {
                pos,
                names,
                ty,
                end: self.last(),
            }
            .into(),
        ))
    }

    /// `names := values`
    fn variable_def(&mut self) -> PResult<Option<Stmt>> {
        let pos = self.pos();
        let names = self.naked_list(None, &[Self::comma, Self::variable_name])?;

        self.take(punct(PunctuationId::ColonEq), "variable definition: operator expected")?;

        let values = self.value_list()?;

        Ok(Some(
            VariableDef {
                pos,
                names,
                values,
                end: self.last(),
            }
            .into(),
        ))
    }

    fn variable_name(&mut self) -> PResult<Option<String>> {
        Ok(Some(self.take(WORD, "variable name expected")?.text.clone()))
    }

    // --- value lists -----------------------------------------------------------

    /// Right-hand side of `=`, `:=` or `return`.
    ///
    /// The single-line form goes first: `(a + b) * c` must stay one expression instead of
    /// becoming a one-element delimited list followed by stray tokens.
    fn value_list(&mut self) -> PResult<Vec<ExprListItem>> {
        self.first_of(&[Self::naked_values, Self::delimited_values])
    }

    fn naked_values(&mut self) -> PResult<Vec<ExprListItem>> {
        self.naked_list(None, &[Self::comma, Self::list_value])
    }

    fn delimited_values(&mut self) -> PResult<Vec<ExprListItem>> {
        self.take(punct(PunctuationId::LParen), "value list expected")?;
        self.list_until(
            StopAt::Token(punct(PunctuationId::RParen)),
            &[Self::comma, Self::comment_item, Self::list_value, Self::newline_item],
        )
    }
}
