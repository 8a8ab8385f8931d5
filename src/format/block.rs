//! Block and statement rendering.
//!
//! Imports inside a block are hoisted into the file's import section and leave nothing behind;
//! the line they occupied still counts when spacing the statements around them.

use dp_syntax::ast::{Node, Stmt};

use super::Formatter;
use super::columns::{ColumnWidths, CommentColumns};
use super::expr::Operand;

/// Whether a statement is moved out of its block by import hoisting.
pub(super) fn is_hoisted(node: &Stmt) -> bool {
    matches!(node, Stmt::Import(_))
}

/// Whether a body renders anything once hoisted imports are gone.
pub(super) fn has_content(body: &[Stmt]) -> bool {
    body.iter().any(|node| !is_hoisted(node))
}

/// Aligned columns of a declaration or definition statement.
fn statement_columns(node: &Stmt) -> Option<(usize, Vec<String>)> {
    match node {
        Stmt::VariableDecl(decl) => Some((decl.pos.line, vec![decl.names.join(", "), ":".into()])),
        Stmt::VariableDef(def) => Some((def.pos.line, vec![def.names.join(", "), ":=".into()])),
        _ => None,
    }
}

impl Formatter {
    // ========================================================================
    // Blocks
    // ========================================================================

    /// Write `{`, the statements indented at `level`, and `}` at the enclosing level.
    pub(super) fn block(&mut self, level: usize, start_line: usize, nodes: &[Stmt]) {
        self.render_cached("block", level, nodes, |f| {
            f.writer.write_char('{');

            let widths = ColumnWidths::measure(nodes, statement_columns);
            let mut comments = CommentColumns::new();
            f.render_twice(|f| f.statements(level, start_line, nodes, &widths, &mut comments));

            f.writer.newline();
            f.writer.indent(level.saturating_sub(1));
            f.writer.write_char('}');
        });
    }

    fn statements(
        &mut self,
        level: usize,
        start_line: usize,
        nodes: &[Stmt],
        widths: &ColumnWidths,
        comments: &mut CommentColumns,
    ) {
        let mut prev_line = start_line;

        for node in nodes {
            if is_hoisted(node) {
                prev_line = node.end_pos().line;
                continue;
            }

            self.indent_node(level, prev_line, node);
            self.statement(level, node, widths, comments);

            let end_line = node.end_pos().line;
            if node.pos().line != end_line {
                comments.reset(end_line);
            }
            prev_line = end_line;
        }
    }

    fn statement(
        &mut self,
        level: usize,
        node: &Stmt,
        widths: &ColumnWidths,
        comments: &mut CommentColumns,
    ) {
        match node {
            Stmt::Assign(assign) => {
                for (i, target) in assign.objects.iter().enumerate() {
                    if i > 0 {
                        self.writer.write(", ");
                    }
                    self.assign_target(level + 1, target);
                }
                self.writer.write(" = ");
                self.expr_list(level + 1, assign.pos.line, &assign.subjects, false);
            }

            Stmt::Block(block) => self.block(level + 1, block.pos.line, &block.body),

            Stmt::Break(_) => self.writer.write("break"),

            Stmt::Comment(comment) => self.comment(level, comment, comments),

            Stmt::Continue(_) => self.writer.write("continue"),

            Stmt::Expression(stmt) => self.expr(level + 1, &stmt.expr, Operand::TOP),

            Stmt::For(stmt) => {
                self.writer.write("for ");
                if let Some(test) = &stmt.test {
                    self.expr(level + 1, test, Operand::TOP);
                    self.writer.write_char(' ');
                }
                self.block(level + 1, stmt.body_pos.line, &stmt.body);
            }

            Stmt::If(stmt) => {
                self.writer.write("if ");
                self.expr(level + 1, &stmt.test, Operand::TOP);
                self.writer.write_char(' ');
                self.block(level + 1, stmt.then_pos.line, &stmt.then_body);
                if has_content(&stmt.else_body) {
                    self.writer.write(" else ");
                    self.block(level + 1, stmt.then_end.line, &stmt.else_body);
                }
            }

            Stmt::Import(_) => {}

            Stmt::Return(stmt) => {
                self.writer.write("return");
                if !stmt.values.is_empty() {
                    self.writer.write_char(' ');
                }
                self.expr_list(level + 1, stmt.pos.line, &stmt.values, false);
            }

            Stmt::VariableDecl(decl) => {
                self.columns(&[decl.names.join(", "), ":".into()], &widths.row(decl.pos.line));
                self.writer.write_char(' ');
                match &decl.ty {
                    Some(spec) => self.writer.write(&spec.ty.to_string()),
                    None => self.writer.write("auto"),
                }
            }

            Stmt::VariableDef(def) => {
                self.columns(&[def.names.join(", "), ":=".into()], &widths.row(def.pos.line));
                self.writer.write_char(' ');
                self.expr_list(level + 1, def.pos.line, &def.values, false);
            }
        }
    }

    /// Write `values`, padding each but the last to its column width.
    pub(super) fn columns(&mut self, values: &[String], widths: &[usize]) {
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                let prev = &values[i - 1];
                let used = prev.chars().count();
                let width = widths.get(i - 1).copied().unwrap_or(used + 1);
                self.writer.pad(width.saturating_sub(used).max(1));
            }
            self.writer.write(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::format::format_source;

    fn fmt(source: &str) -> String {
        format_source("test.dp", source).unwrap()
    }

    #[test]
    fn test_declarations_align() {
        assert_eq!(
            fmt("f() {\n\tx := 1\n\tlonger, y : int\n\tz : auto\n}\n"),
            "f() () {\n\tx         := 1\n\tlonger, y : int\n\tz         : auto\n}\n"
        );
    }

    #[test]
    fn test_blank_lines_collapse_to_one() {
        assert_eq!(
            fmt("f() {\n\ta()\n\n\n\tb()\n\tc()\n}\n"),
            "f() () {\n\ta()\n\n\tb()\n\tc()\n}\n"
        );
    }

    #[test]
    fn test_trailing_comments_align() {
        assert_eq!(
            fmt("f() {\n\ta = 1 // one\n\tbbb = 22 // two\n\n\tc() // three\n}\n"),
            "f() () {\n\ta = 1    // one\n\tbbb = 22 // two\n\n\tc() // three\n}\n"
        );
    }

    #[test]
    fn test_comment_alone_after_trailing_comment() {
        assert_eq!(
            fmt("f() {\n\ta = 1 // one\n\t// two\n\tbb = 2 // three\n}\n"),
            "f() () {\n\ta = 1 // one\n\t// two\n\tbb = 2 // three\n}\n"
        );
    }

    #[test]
    fn test_control_flow() {
        assert_eq!(
            fmt("f() {\n\tfor i < n { i = i + 1 }\n\tif x { y = 1 } else { z = 2 }\n\tfor {\n\t\tbreak\n\t}\n}\n"),
            "f() () {\n\
             \tfor i < n {\n\t\ti = i + 1\n\t}\n\
             \tif x {\n\t\ty = 1\n\t} else {\n\t\tz = 2\n\t}\n\
             \tfor {\n\t\tbreak\n\t}\n\
             }\n"
        );
    }

    #[test]
    fn test_multi_line_value_is_delimited() {
        assert_eq!(
            fmt("f() int {\n\treturn g(\n\t\ta,\n\t)\n}\n"),
            "f() int {\n\treturn (\n\t\tg(\n\t\t\ta,\n\t\t),\n\t)\n}\n"
        );
    }

    #[test]
    fn test_hoisted_import_leaves_block() {
        assert_eq!(
            fmt("f() {\n\timport \"a\"\n\tg()\n}\n"),
            "import {\n\t\"a\"\n}\n\nf() () {\n\tg()\n}\n"
        );
    }

    #[test]
    fn test_empty_else_is_dropped() {
        assert_eq!(
            fmt("f() {\n\tif x {\n\t\ty()\n\t} else {\n\t}\n}\n"),
            "f() () {\n\tif x {\n\t\ty()\n\t}\n}\n"
        );
    }

    #[test]
    fn test_deep_nesting_formats_quickly() {
        let depth = 64;
        let mut source = String::from("f() () {\n");
        for level in 1..=depth {
            source.push_str(&"\t".repeat(level));
            source.push_str("{\n");
        }
        source.push_str(&"\t".repeat(depth + 1));
        source.push_str("g(\n");
        source.push_str(&"\t".repeat(depth + 2));
        source.push_str("a, // first\n");
        source.push_str(&"\t".repeat(depth + 1));
        source.push_str(")\n");
        for level in (1..=depth).rev() {
            source.push_str(&"\t".repeat(level));
            source.push_str("}\n");
        }
        source.push_str("}\n");

        let start = Instant::now();
        let formatted = fmt(&source);
        assert!(start.elapsed() < Duration::from_secs(10), "took {:?}", start.elapsed());
        assert_eq!(formatted, source);
    }
}
