/// File-level declarations.
///
/// This chunk parses constant, function and type definitions, imports in all their forms,
/// and the list members they contain (parameters, fields, import names).
impl<'a> Parser<'a> {
    // ========================================================================
    // Declarations
    // ========================================================================

    /// `[pub] name = expr`
    fn constant_def(&mut self) -> PResult<Option<FileItem>> {
        let first = self.take(WORD, "constant definition: pub keyword or name expected")?;
        let (public, name) = if first.text == access::PUB {
            (true, self.take(WORD, "constant definition: name expected")?)
        } else {
            (false, first)
        };

        self.take(punct(PunctuationId::Eq), "constant definition: assignment operator expected")?;
        let value = self.any_expr(false)?;

        Ok(Some(
            ConstantDef {
                pos: first.position.clone(),
                public,
                name: name.text.clone(),
                value,
                end: self.last(),
            }
            .into(),
        ))
    }

    /// `[pub] [(recv Type)] [name](params) results { body }`
    fn function_def(&mut self) -> PResult<Option<FileItem>> {
        let pos = self.pos();

        let public = matches!(self.peek(), Some(t) if t.is_word(access::PUB));
        if public {
            self.skip(WORD);
        }

        let mut receiver_name = String::new();
        let mut receiver_type = None;
        let name;

        if self.skip(punct(PunctuationId::LParen)) {
            receiver_name = self
                .take(WORD, "function definition: receiver name expected")?
                .text
                .clone();
            receiver_type = Some(self.type_spec()?);
            self.take(
                punct(PunctuationId::RParen),
                "function definition: receiver: closing paren expected",
            )?;
            name = self.skim(WORD).map(|t| t.text.clone()).unwrap_or_default();
        } else {
            name = self.take(WORD, "function definition: name expected")?.text.clone();
        }

        self.take(
            punct(PunctuationId::LParen),
            "function definition: parameter list expected",
        )?;
        let params = self.list_until(
            StopAt::Token(punct(PunctuationId::RParen)),
            &[Self::comma, Self::comment_item, Self::newline_item, Self::parameter],
        )?;
        let params_end = self.last();
        let params = fill_in_param_types(params)?;

        let results = self.first_of(&[Self::naked_result_types, Self::delimited_result_types])?;

        let body_pos = self
            .take(punct(PunctuationId::LBrace), "function definition: opening brace expected")?
            .position
            .clone();
        let body = self.statements()?;

        Ok(Some(
            FunctionDef {
                pos,
                public,
                receiver_name,
                receiver_type,
                name,
                params,
                params_end,
                results,
                body_pos,
                body,
                end: self.last(),
            }
            .into(),
        ))
    }

    fn naked_result_types(&mut self) -> PResult<Vec<TypeListItem>> {
        self.naked_list(None, &[Self::comma, Self::type_spec_item])
    }

    fn delimited_result_types(&mut self) -> PResult<Vec<TypeListItem>> {
        self.take(
            punct(PunctuationId::LParen),
            "function definition: return type list expected",
        )?;
        self.list_until(
            StopAt::Token(punct(PunctuationId::RParen)),
            &[Self::comma, Self::comment_item, Self::newline_item, Self::type_spec_item],
        )
    }

    /// `name [Type][,]`; a missing type is filled in from the right by `function_def`.
    fn parameter(&mut self) -> PResult<Option<ParamListItem>> {
        let name = self.take(WORD, "parameter name expected")?;

        let ty = if self.skip(punct(PunctuationId::Comma)) {
            TypeSpec {
                pos: Position::default(),
                ty: Type::default(),
                end: Position::default(),
            }
        } else {
            let spec = self.type_spec()?;
            self.skip(punct(PunctuationId::Comma));
            spec
        };

        Ok(Some(
            Parameter {
                pos: name.position.clone(),
                name: name.text.clone(),
                ty,
                end: self.last(),
            }
            .into(),
        ))
    }

    /// Optional `visible`, `mutable` or `assignable` word.
    fn field_access(&mut self) -> PResult<FieldAccess> {
        match self.skim(WORD) {
            Some(word) => FieldAccess::from_word(&word.text).ok_or_else(|| {
                SourceError::syntax(
                    word.position.clone(),
                    "visible, mutable or assignable keyword expected",
                )
            }),
            None => Ok(FieldAccess::Hidden),
        }
    }

    /// `name Type [access]`
    fn field(&mut self) -> PResult<Option<FieldListItem>> {
        let name = self.take(WORD, "field name expected")?;
        let ty = self.type_spec()?;
        let access = self.field_access()?;

        Ok(Some(
            Field {
                pos: name.position.clone(),
                name: name.text.clone(),
                ty,
                access,
                end: self.last(),
            }
            .into(),
        ))
    }

    /// `[pub] Name [access] { fields }`
    fn type_def(&mut self) -> PResult<Option<FileItem>> {
        let first = self.take(WORD, "type definition: pub keyword or name expected")?;
        let (public, name) = if first.text == access::PUB {
            (true, self.take(WORD, "type definition: name expected")?)
        } else {
            (false, first)
        };

        let fallback = self.field_access()?;

        self.take(punct(PunctuationId::LBrace), "type definition: opening brace expected")?;
        let mut fields = self.list_until(
            StopAt::Token(punct(PunctuationId::RBrace)),
            &[
                Self::comma,
                Self::comment_item,
                Self::field,
                Self::import_item,
                Self::newline_item,
                Self::semicolon_item,
            ],
        )?;

        if fallback != FieldAccess::Hidden {
            for node in &mut fields {
                if let FieldListItem::Field(field) = node {
                    if field.access == FieldAccess::Hidden {
                        field.access = fallback;
                    }
                }
            }
        }

        Ok(Some(
            TypeDef {
                pos: first.position.clone(),
                public,
                name: name.text.clone(),
                fields,
                end: self.last(),
            }
            .into(),
        ))
    }

    // --- imports ---------------------------------------------------------------

    /// `[import] ["path"] [names]`
    fn import(&mut self, require_keyword: bool) -> PResult<Import> {
        let pos = self.pos();

        if !self.skip(keyword(KeywordId::Import)) && require_keyword {
            return Err(SourceError::syntax(pos, "import keyword expected"));
        }

        let path = match self.skim(TokenKind::String) {
            Some(token) => Some(quoted_import_path(token)?),
            None => None,
        };

        let names = if self.skip(punct(PunctuationId::LParen)) {
            self.list_until(
                StopAt::Token(punct(PunctuationId::RParen)),
                &[Self::comma, Self::comment_item, Self::identifier, Self::newline_item],
            )?
        } else {
            self.naked_list(None, &[Self::comma, Self::identifier])?
        };

        if !require_keyword && path.is_none() && names.is_empty() {
            return Err(self.error("import: path or identifier list expected"));
        }

        Ok(Import {
            pos,
            path,
            names,
            end: self.last(),
        })
    }

    /// Import with a required keyword, as a block or type-body member.
    fn import_item<T: From<Import>>(&mut self) -> PResult<Option<T>> {
        Ok(Some(self.import(true)?.into()))
    }

    fn import_entry(&mut self) -> PResult<Option<ImportListItem>> {
        Ok(Some(self.import(false)?.into()))
    }

    fn import_path(&mut self) -> PResult<Option<ImportListItem>> {
        let token = self.take(TokenKind::String, "import path expected")?;
        let path = quoted_import_path(token)?;
        Ok(Some(
            Import {
                pos: token.position.clone(),
                path: Some(path),
                names: Vec::new(),
                end: self.last(),
            }
            .into(),
        ))
    }

    /// `import "a", "b"` | `import ( "a" ... )` | `import { entries }`
    fn imports(&mut self) -> PResult<Option<FileItem>> {
        let keyword_token = self.take(keyword(KeywordId::Import), "import keyword expected")?;

        let imports = if self.check(TokenKind::String) {
            self.naked_list(None, &[Self::comma, Self::import_path])?
        } else if self.skip(punct(PunctuationId::LParen)) {
            self.list_until(
                StopAt::Token(punct(PunctuationId::RParen)),
                &[Self::comma, Self::comment_item, Self::import_path, Self::newline_item],
            )?
        } else {
            self.take(punct(PunctuationId::LBrace), "import: opening brace expected")?;
            self.list_until(
                StopAt::Token(punct(PunctuationId::RBrace)),
                &[
                    Self::comma,
                    Self::comment_item,
                    Self::import_entry,
                    Self::newline_item,
                    Self::semicolon_item,
                ],
            )?
        };

        Ok(Some(
            Imports {
                pos: keyword_token.position.clone(),
                imports,
                end: self.last(),
            }
            .into(),
        ))
    }
}

/// Import paths must be double-quoted; backquoted strings are rejected.
fn quoted_import_path(token: &Token) -> PResult<String> {
    if !token.text.starts_with('"') {
        return Err(SourceError::syntax(
            token.position.clone(),
            "import path: opening quote expected",
        ));
    }
    Ok(token.text.clone())
}

/// Give each untyped parameter the type of the nearest typed parameter to its right.
fn fill_in_param_types(mut nodes: Vec<ParamListItem>) -> PResult<Vec<ParamListItem>> {
    let mut latest: Option<TypeSpec> = None;

    for node in nodes.iter_mut().rev() {
        let ParamListItem::Parameter(param) = node else {
            continue;
        };

        if param.ty.ty.is_specified() {
            latest = Some(param.ty.clone());
        } else {
            match &latest {
                Some(spec) => param.ty = spec.clone(),
                None => {
                    return Err(SourceError::syntax(
                        param.end.clone(),
                        "function parameter type expected",
                    ));
                }
            }
        }
    }

    Ok(nodes)
}
