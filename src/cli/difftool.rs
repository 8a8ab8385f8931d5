//! External diff invocation for `dpfmt -d`.
//!
//! The canonical text is piped to the tool's standard input and compared with the file on disk:
//! `<command> -u FILE /dev/stdin`. The tool's exit status becomes the exit status of `dpfmt`, so
//! 0 means no difference.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use super::{CliError, CliResult, ExitCode};

/// Run `command` to compare `path` with `canonical`.
pub fn run_diff(command: &str, path: &Path, canonical: &str) -> CliResult<ExitCode> {
    tracing::debug!(command, file = %path.display(), "running diff tool");

    let mut child = Command::new(command)
        .arg("-u")
        .arg(path)
        .arg("/dev/stdin")
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| CliError::failure(format!("{command}: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        // A tool that exits early closes the pipe; its exit status tells the rest.
        if let Err(e) = stdin.write_all(canonical.as_bytes()) {
            tracing::debug!(error = %e, "diff tool stopped reading");
        }
    }

    let status = child
        .wait()
        .map_err(|e| CliError::failure(format!("{command}: {e}")))?;

    Ok(match status.code() {
        Some(code) => ExitCode(code),
        None => ExitCode::FAILURE,
    })
}

#[cfg(all(test, unix))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_failure() {
        let err = run_diff("dpfmt-no-such-diff-tool", Path::new("x.dp"), "").unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.starts_with("dpfmt-no-such-diff-tool: "));
    }

    #[test]
    fn test_exit_status_is_passed_through() {
        // `true` and `false` ignore their arguments
        assert_eq!(run_diff("true", Path::new("x.dp"), "x = 1\n").unwrap(), ExitCode::SUCCESS);
        assert_eq!(run_diff("false", Path::new("x.dp"), "x = 1\n").unwrap(), ExitCode::FAILURE);
    }
}
