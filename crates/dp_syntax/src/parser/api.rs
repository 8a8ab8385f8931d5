/// Parse a token stream into file-level items.
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `dp_syntax::lexer`.
///
/// ## Errors
/// Returns a [`SourceError`] carrying the failures of every alternative tried at the point
/// where parsing got stuck.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Vec<FileItem>, SourceError> {
    let items = Parser::new(tokens).parse()?;
    tracing::debug!(item_count = items.len(), "parsed file");
    Ok(items)
}
