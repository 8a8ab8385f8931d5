//! Settings resolved from the command line and the environment.
//!
//! The diff tool comes from `--diff-command`, falling back to the `DPFMT_DIFF` environment
//! variable and then to `diff`; clap resolves that order before a [`ToolConfig`] is built.

/// What `dpfmt` does with the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Write the canonical text to stdout.
    #[default]
    Print,
    /// Compare the file with its canonical text using the diff tool.
    Diff,
    /// Replace the file with its canonical text.
    Write,
    /// Fail when the file is not canonical.
    Check,
    /// Dump tokens.
    Tokens,
    /// Dump the syntax tree.
    Ast,
}

/// Diff tool used when none is configured.
pub const DEFAULT_DIFF_COMMAND: &str = "diff";

/// Settings for one `dpfmt` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub mode: Mode,
    /// Program run as `<diff_command> -u FILE /dev/stdin`.
    pub diff_command: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            diff_command: DEFAULT_DIFF_COMMAND.to_string(),
        }
    }
}

impl ToolConfig {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Use `command` as the diff tool. An empty command keeps the default.
    pub fn with_diff_command(mut self, command: impl Into<String>) -> Self {
        let command = command.into();
        if !command.trim().is_empty() {
            self.diff_command = command;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ToolConfig::default();
        assert_eq!(config.mode, Mode::Print);
        assert_eq!(config.diff_command, "diff");
    }

    #[test]
    fn test_builder_overrides() {
        let config = ToolConfig::default()
            .with_mode(Mode::Diff)
            .with_diff_command("colordiff");
        assert_eq!(config.mode, Mode::Diff);
        assert_eq!(config.diff_command, "colordiff");
    }

    #[test]
    fn test_empty_diff_command_keeps_default() {
        let config = ToolConfig::default().with_diff_command("  ");
        assert_eq!(config.diff_command, DEFAULT_DIFF_COMMAND);
    }
}
