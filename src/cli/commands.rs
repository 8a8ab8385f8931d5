//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::io::{self, Write};
use std::path::Path;

use dp_syntax::ast::Node;
use dp_syntax::source::Position;
use dp_syntax::{lexer, parser};

use crate::format::{format_diff, format_source_bytes};

use super::config::{Mode, ToolConfig};
use super::difftool::run_diff;
use super::files::{read_file, replace_file};
use super::{CliError, CliResult, ExitCode};

/// Run the configured operation on one file.
pub fn run_file(config: &ToolConfig, path: &Path) -> CliResult<ExitCode> {
    let bytes = read_file(path)?;
    let label = path.to_string_lossy();

    match config.mode {
        Mode::Tokens => return print_tokens(&label, &bytes),
        Mode::Ast => return print_ast(&label, &bytes),
        Mode::Print | Mode::Diff | Mode::Write | Mode::Check => {}
    }

    let formatted = format_source_bytes(&label, &bytes)?;
    let changed = bytes != formatted.as_bytes();

    match config.mode {
        Mode::Diff => run_diff(&config.diff_command, path, &formatted),
        Mode::Write => {
            if changed {
                replace_file(path, formatted.as_bytes())?;
                tracing::info!(file = %label, "formatted");
            }
            Ok(ExitCode::SUCCESS)
        }
        Mode::Check => {
            if !changed {
                return Ok(ExitCode::SUCCESS);
            }
            if let Ok(source) = std::str::from_utf8(&bytes) {
                if let Some(diff) = format_diff(source, &formatted) {
                    tracing::debug!(file = %label, "not formatted:\n{diff}");
                }
            }
            println!("{label}");
            Ok(ExitCode::FAILURE)
        }
        _ => {
            write_stdout(formatted.as_bytes())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Lex and display tokens.
pub fn print_tokens(label: &str, bytes: &[u8]) -> CliResult<ExitCode> {
    let tokens = lexer::tokenize_bytes(Position::location(label), bytes)?;

    let mut out = String::new();
    for token in &tokens {
        out.push_str(&token.to_string());
        out.push('\n');
    }
    write_stdout(out.as_bytes())?;
    Ok(ExitCode::SUCCESS)
}

/// Parse and display the syntax tree, one file item per line.
pub fn print_ast(label: &str, bytes: &[u8]) -> CliResult<ExitCode> {
    let tokens = lexer::tokenize_bytes(Position::location(label), bytes)?;
    let items = parser::parse(&tokens)?;

    let mut out = String::new();
    for item in &items {
        out.push_str(&item.dump());
        out.push('\n');
    }
    write_stdout(out.as_bytes())?;
    Ok(ExitCode::SUCCESS)
}

fn write_stdout(bytes: &[u8]) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(bytes)
        .and_then(|()| stdout.flush())
        .map_err(|e| CliError::failure(format!("stdout: {e}")))
}
