/// Type and name grammar.
///
/// A type is a run of optional flags in fixed order (`=` assigner, `*` pointer, `&` reference,
/// `#` shared) followed by either `[item]` or a qualified name.
impl<'a> Parser<'a> {
    // ========================================================================
    // Types
    // ========================================================================

    fn type_expr(&mut self) -> PResult<Type> {
        let assigner = self.skip(punct(PunctuationId::Eq));
        let pointer = self.skip(operator(OperatorId::Star));
        let reference = self.skip(operator(OperatorId::Amp));
        let shared = self.skip(punct(PunctuationId::Hash));

        let mut ty = Type {
            assigner,
            pointer,
            reference,
            shared,
            ..Type::default()
        };

        if self.skip(punct(PunctuationId::LBracket)) {
            ty.item = Some(Box::new(self.nested(Self::type_expr)?));
            self.take(
                punct(PunctuationId::RBracket),
                "type: array closing bracket expected",
            )?;
        } else {
            ty.name = self.qualified_name()?;
        }

        Ok(ty)
    }

    fn type_spec(&mut self) -> PResult<TypeSpec> {
        let pos = self.pos();
        let ty = self.type_expr()?;
        Ok(TypeSpec {
            pos,
            ty,
            end: self.last(),
        })
    }

    fn type_spec_item(&mut self) -> PResult<Option<TypeListItem>> {
        Ok(Some(self.type_spec()?.into()))
    }

    /// `[::]name(::name)*`
    fn qualified_name(&mut self) -> PResult<QualifiedName> {
        let mut parts = Vec::new();

        if self.skip(punct(PunctuationId::ColonColon)) {
            parts.push(String::new());
        }

        loop {
            parts.push(self.take(WORD, "name expected")?.text.clone());

            if !self.skip(punct(PunctuationId::ColonColon)) {
                return Ok(QualifiedName(parts));
            }
        }
    }

    /// Import list member.
    fn identifier(&mut self) -> PResult<Option<IdentListItem>> {
        let pos = self.pos();
        let name = self.qualified_name()?;
        Ok(Some(
            Identifier {
                pos,
                name,
                end: self.last(),
            }
            .into(),
        ))
    }
}
