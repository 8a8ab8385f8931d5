//! Output writer for canonical dp text.
//!
//! Tracks nothing but the text itself: indentation is tabs written on demand, and the column of
//! the current line is derived from the buffer. A [`Checkpoint`] lets the formatter render a
//! construct once to measure it and then render it again from the same point.

/// Position in the output that rendering can rewind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Append-only text buffer with rewind support.
#[derive(Debug, Default)]
pub struct FormatWriter {
    output: String,
}

impl FormatWriter {
    /// Get the formatted output
    pub fn finish(self) -> String {
        self.output
    }

    pub fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub fn write_char(&mut self, c: char) {
        self.output.push(c);
    }

    /// Write a comment's text without surrounding whitespace.
    pub fn write_trimmed(&mut self, s: &str) {
        self.output.push_str(s.trim());
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Write `level` tabs.
    pub fn indent(&mut self, level: usize) {
        for _ in 0..level {
            self.output.push('\t');
        }
    }

    /// Write `amount` spaces.
    pub fn pad(&mut self, amount: usize) {
        for _ in 0..amount {
            self.output.push(' ');
        }
    }

    /// Last character written, if any.
    pub fn last_char(&self) -> Option<char> {
        self.output.chars().next_back()
    }

    /// Length of the current line in characters; a tab counts as one.
    pub fn current_line_len(&self) -> usize {
        let line = match self.output.rfind('\n') {
            Some(i) => &self.output[i + 1..],
            None => &self.output,
        };
        line.chars().count()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.output.len())
    }

    /// Text written after `checkpoint`.
    pub fn since(&self, checkpoint: Checkpoint) -> &str {
        &self.output[checkpoint.0..]
    }

    /// Discard everything written after `checkpoint`.
    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.output.truncate(checkpoint.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_writer_empty_output() {
        assert_eq!(FormatWriter::default().finish(), "");
    }

    #[test]
    fn test_indent_and_pad() {
        let mut writer = FormatWriter::default();
        writer.indent(2);
        writer.write("x");
        writer.pad(3);
        writer.write("y");
        assert_eq!(writer.finish(), "\t\tx   y");
    }

    #[test]
    fn test_current_line_len_counts_chars() {
        let mut writer = FormatWriter::default();
        assert_eq!(writer.current_line_len(), 0);
        writer.write("first line\n\tä");
        assert_eq!(writer.current_line_len(), 2);
        writer.newline();
        assert_eq!(writer.current_line_len(), 0);
    }

    #[test]
    fn test_last_char() {
        let mut writer = FormatWriter::default();
        assert_eq!(writer.last_char(), None);
        writer.write("a &");
        assert_eq!(writer.last_char(), Some('&'));
    }

    #[test]
    fn test_rewind_discards_tail() {
        let mut writer = FormatWriter::default();
        writer.write("keep");
        let mark = writer.checkpoint();
        writer.write(" drop");
        writer.rewind(mark);
        writer.write_trimmed("  // c  ");
        assert_eq!(writer.finish(), "keep// c");
    }
}
