//! Canonical formatter for dp source code.
//!
//! There is exactly one way to format a dp file. Formatting is total: every tree the parser
//! accepts has a canonical form, so [`format`] cannot fail. The conveniences that start from
//! text fail only when the text does not lex or parse.
//!
//! ## Notes
//! - Tab indentation; aligned columns and trailing comments use spaces.
//! - All imports of a file, including those nested in function and type bodies, are merged into
//!   one `import { ... }` section near the top.
//! - Formatting is idempotent: formatting canonical text returns it unchanged.
//!
//! ## Examples
//! ```rust
//! use dp::format::format_source;
//!
//! let out = format_source("main.dp", "x = a+b * c\n").unwrap();
//! assert_eq!(out, "x = a + b*c\n");
//! ```

mod block;
mod columns;
mod comments;
mod expr;
mod formatter;
mod imports;
mod writer;

pub use formatter::Formatter;
pub use imports::{import_path_group, import_path_namespaces, unquote_import_path};

use dp_syntax::ast::FileItem;
use dp_syntax::diagnostics::SourceError;
use dp_syntax::source::Position;
use dp_syntax::{lexer, parser};

/// Format parsed file items.
#[tracing::instrument(skip_all, fields(item_count = nodes.len()))]
pub fn format(nodes: &[FileItem]) -> String {
    let output = Formatter::new().format(nodes);
    tracing::debug!(len = output.len(), "formatted file");
    output
}

/// Lex, parse and format source text. `path` only labels error positions.
#[tracing::instrument(skip(text), fields(len = text.len()))]
pub fn format_source(path: &str, text: &str) -> Result<String, SourceError> {
    let tokens = lexer::tokenize(Position::location(path), text)?;
    let nodes = parser::parse(&tokens)?;
    Ok(format(&nodes))
}

/// Like [`format_source`], for raw file contents that are not yet known to be UTF-8.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn format_source_bytes(path: &str, bytes: &[u8]) -> Result<String, SourceError> {
    let tokens = lexer::tokenize_bytes(Position::location(path), bytes)?;
    let nodes = parser::parse(&tokens)?;
    Ok(format(&nodes))
}

/// Check if source text is already canonical.
pub fn check_formatted(path: &str, text: &str) -> Result<bool, SourceError> {
    Ok(format_source(path, text)? == text)
}

/// Line-by-line comparison of `source` with its canonical `formatted` text, or `None` when they
/// are equal.
pub fn format_diff(source: &str, formatted: &str) -> Option<String> {
    if source == formatted {
        return None;
    }

    let mut diff = String::new();
    let original_lines: Vec<&str> = source.lines().collect();
    let formatted_lines: Vec<&str> = formatted.lines().collect();

    let max_lines = original_lines.len().max(formatted_lines.len());

    for i in 0..max_lines {
        let orig = original_lines.get(i).copied();
        let fmt = formatted_lines.get(i).copied();

        if orig != fmt {
            if let Some(orig) = orig {
                diff.push_str(&format!("-{:4} | {}\n", i + 1, orig));
            }
            if let Some(fmt) = fmt {
                diff.push_str(&format!("+{:4} | {}\n", i + 1, fmt));
            }
        }
    }

    Some(diff)
}
