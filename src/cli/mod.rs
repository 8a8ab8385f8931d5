//! CLI module for the `dpfmt` formatter
//!
//! ## Usage
//!
//! - `dpfmt FILE` - Print the canonical text of FILE
//! - `dpfmt -w FILE` - Rewrite FILE in place when it is not canonical
//! - `dpfmt -d FILE` - Show the changes as a unified diff
//! - `dpfmt --check FILE` - Name FILE and fail when it is not canonical
//! - `dpfmt --tokens FILE` / `dpfmt --ast FILE` - Debug dumps
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//! - `config` - Resolved settings for one invocation
//! - `difftool` - External diff invocation
//! - `files` - Reading and atomically replacing source files
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;
pub mod config;
pub mod difftool;
pub mod files;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser};

use self::config::{Mode, ToolConfig};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Invalid command line; clap exits with this code on its own.
    pub const USAGE: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<dp_syntax::diagnostics::SourceError> for CliError {
    fn from(err: dp_syntax::diagnostics::SourceError) -> Self {
        Self::failure(err.to_string())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Canonical formatter for dp source files
#[derive(Parser, Debug)]
#[command(name = "dpfmt")]
#[command(version = VERSION)]
#[command(about = "Canonical formatter for dp source files", long_about = None)]
#[command(group(ArgGroup::new("mode").args(["diff", "write", "check", "tokens", "ast"])))]
pub struct Cli {
    /// Source file to format
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Show the changes as a unified diff instead of printing the result
    #[arg(short = 'd', long = "diff")]
    pub diff: bool,

    /// Replace the file when its formatting changes
    #[arg(short = 'w', long = "write")]
    pub write: bool,

    /// Exit with failure when the file is not canonically formatted
    #[arg(long = "check")]
    pub check: bool,

    // Debug/development flags
    /// Print the token stream (debug)
    #[arg(long = "tokens")]
    pub tokens: bool,

    /// Print the syntax tree (debug)
    #[arg(long = "ast")]
    pub ast: bool,

    /// Diff tool used by --diff
    #[arg(long = "diff-command", value_name = "CMD", env = "DPFMT_DIFF", default_value = "diff")]
    pub diff_command: String,
}

impl Cli {
    /// Operation selected by the flags.
    pub fn mode(&self) -> Mode {
        if self.diff {
            Mode::Diff
        } else if self.write {
            Mode::Write
        } else if self.check {
            Mode::Check
        } else if self.tokens {
            Mode::Tokens
        } else if self.ast {
            Mode::Ast
        } else {
            Mode::Print
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code != ExitCode::SUCCESS {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = ToolConfig::default()
        .with_mode(cli.mode())
        .with_diff_command(cli.diff_command);

    tracing::debug!(file = %cli.file.display(), ?config, "dpfmt");

    commands::run_file(&config, &cli.file)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_default_prints() {
        let cli = Cli::try_parse_from(["dpfmt", "main.dp"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("main.dp"));
        assert_eq!(cli.mode(), Mode::Print);
    }

    #[test]
    fn test_cli_parse_modes() {
        let cli = Cli::try_parse_from(["dpfmt", "-w", "main.dp"]).unwrap();
        assert_eq!(cli.mode(), Mode::Write);

        let cli = Cli::try_parse_from(["dpfmt", "-d", "main.dp"]).unwrap();
        assert_eq!(cli.mode(), Mode::Diff);

        let cli = Cli::try_parse_from(["dpfmt", "--check", "main.dp"]).unwrap();
        assert_eq!(cli.mode(), Mode::Check);

        let cli = Cli::try_parse_from(["dpfmt", "--tokens", "main.dp"]).unwrap();
        assert_eq!(cli.mode(), Mode::Tokens);

        let cli = Cli::try_parse_from(["dpfmt", "--ast", "main.dp"]).unwrap();
        assert_eq!(cli.mode(), Mode::Ast);
    }

    #[test]
    fn test_cli_modes_conflict() {
        let err = Cli::try_parse_from(["dpfmt", "-w", "-d", "main.dp"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_cli_requires_file() {
        let err = Cli::try_parse_from(["dpfmt"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), ExitCode::USAGE.0);
    }

    #[test]
    fn test_cli_diff_command_flag() {
        let cli = Cli::try_parse_from(["dpfmt", "-d", "--diff-command", "colordiff", "main.dp"]).unwrap();
        assert_eq!(cli.diff_command, "colordiff");
    }
}
