//! Expression and value list rendering.
//!
//! ## Notes
//! - Multiplicative operands of a lower-tier chain are written without spaces (`a + b*c`), which
//!   is also how the parser groups them.
//! - Parentheses appear exactly where the tree differs from what the parser would build
//!   without them: a lower-tier operand, a non-multiplicative higher-tier operand, and a
//!   same-tier right operand.

use dp_core::lang::operators::{MAX_BINARY_PRECEDENCE, ULTIMATE_PRECEDENCE};
use dp_syntax::ast::{AssignTarget, AssignerDereference, Expr, ExprListItem, Node, UnaryOp};

use super::Formatter;
use super::columns::CommentColumns;

/// Where an expression sits relative to its parent operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Operand {
    /// Precedence of the enclosing operator, 0 at the top of an expression.
    pub precedence: u8,
    /// Write binary operators without surrounding spaces.
    pub tight: bool,
    /// Right-hand operand of the enclosing binary operator.
    pub right: bool,
}

impl Operand {
    pub const TOP: Operand = Operand {
        precedence: 0,
        tight: false,
        right: false,
    };

    /// Operand of a prefix operator.
    fn prefixed(self) -> Operand {
        Operand {
            precedence: ULTIMATE_PRECEDENCE,
            tight: self.tight,
            right: false,
        }
    }
}

/// A value list spans lines when any member ends after `start_line` or is a comment.
pub(super) fn use_multiple_lines(start_line: usize, nodes: &[ExprListItem]) -> bool {
    nodes
        .iter()
        .any(|node| node.end_pos().line > start_line || node.as_comment().is_some())
}

impl Formatter {
    // ========================================================================
    // Expressions
    // ========================================================================

    pub(super) fn expr(&mut self, level: usize, expr: &Expr, operand: Operand) {
        match expr {
            Expr::Address(node) => {
                if self.writer.last_char() == Some('&') {
                    self.writer.write_char(' ');
                }
                self.writer.write_char('&');
                self.expr(level, &node.expr, operand.prefixed());
            }

            Expr::Binary(node) => {
                let precedence = node.op.precedence();
                let parent = operand.precedence;

                let tight = operand.tight
                    || (parent > 0 && precedence > parent && precedence == MAX_BINARY_PRECEDENCE);
                let parens = parent > 0
                    && (precedence < parent
                        || (precedence > parent && precedence != MAX_BINARY_PRECEDENCE)
                        || (precedence == parent && operand.right));

                if parens {
                    self.writer.write_char('(');
                }

                let side = |right| Operand {
                    precedence,
                    tight,
                    right,
                };

                self.expr(level, &node.left, side(false));
                if !tight {
                    self.writer.write_char(' ');
                }
                self.writer.write(node.op.as_str());
                if !tight {
                    self.writer.write_char(' ');
                }
                self.expr(level, &node.right, side(true));

                if parens {
                    self.writer.write_char(')');
                }
            }

            Expr::Boolean(node) => self.writer.write(if node.value { "true" } else { "false" }),

            Expr::Call(node) => {
                self.writer.write(&node.name.to_string());
                self.expr_list(level, node.pos().line, &node.args, true);
            }

            Expr::Character(node) => self.writer.write(&node.source),

            Expr::Clone(node) => {
                self.writer.write("clone ");
                self.expr(level, &node.expr, operand.prefixed());
            }

            Expr::Index(node) => {
                self.writer.write(&node.name.to_string());
                self.writer.write_char('[');
                self.expr(level, &node.index, Operand::TOP);
                self.writer.write_char(']');
            }

            Expr::Integer(node) => self.writer.write(&node.source),

            Expr::Nil(_) => self.writer.write("nil"),

            Expr::PointerDereference(node) => {
                self.writer.write_char('*');
                self.expr(level, &node.expr, operand.prefixed());
            }

            Expr::Selector(node) => self.writer.write(&node.to_string()),

            Expr::String(node) => self.writer.write(&node.source),

            Expr::Unary(node) => {
                if node.op == UnaryOp::Identity {
                    self.expr(level, &node.expr, operand);
                    return;
                }
                // `&^` would lex as one operator
                if node.op == UnaryOp::Complement && self.writer.last_char() == Some('&') {
                    self.writer.write_char(' ');
                }
                self.writer.write(node.op.as_str());
                self.expr(level, &node.expr, operand.prefixed());
            }

            Expr::Zero(_) => self.writer.write("{}"),
        }
    }

    fn assigner_dereference(&mut self, node: &AssignerDereference) {
        self.writer.write_char('(');
        self.writer.write(&node.name);
        self.writer.write_char(')');
    }

    /// Left-hand side of an assignment. Index expressions are written tight.
    pub(super) fn assign_target(&mut self, level: usize, node: &AssignTarget) {
        match node {
            AssignTarget::AssignerDereference(node) => self.assigner_dereference(node),
            AssignTarget::Call(node) => {
                self.writer.write(&node.name.to_string());
                self.expr_list(level, node.pos().line, &node.args, true);
            }
            AssignTarget::Index(node) => {
                self.writer.write(&node.name.to_string());
                self.writer.write_char('[');
                self.expr(
                    level,
                    &node.index,
                    Operand {
                        tight: true,
                        ..Operand::TOP
                    },
                );
                self.writer.write_char(']');
            }
            AssignTarget::Selector(node) => self.writer.write(&node.to_string()),
        }
    }

    // ========================================================================
    // Value lists
    // ========================================================================

    /// Call arguments, return values and right-hand sides.
    ///
    /// A list that fits its starting line is written inline, parenthesized only when
    /// `force_parens` is set. Otherwise each member goes on its own line inside parentheses.
    pub(super) fn expr_list(
        &mut self,
        level: usize,
        start_line: usize,
        nodes: &[ExprListItem],
        force_parens: bool,
    ) {
        if use_multiple_lines(start_line, nodes) {
            self.render_cached("values", level, nodes, |f| {
                f.writer.write_char('(');

                let mut columns = CommentColumns::new();
                f.render_twice(|f| f.expr_list_lines(level, start_line, nodes, &mut columns));

                f.writer.newline();
                f.writer.indent(level.saturating_sub(1));
                f.writer.write_char(')');
            });
            return;
        }

        if force_parens {
            self.writer.write_char('(');
        }

        let mut first = true;
        for node in nodes {
            match node {
                ExprListItem::Comment(_) => continue,
                ExprListItem::AssignerDereference(node) => {
                    if !first {
                        self.writer.write(", ");
                    }
                    self.assigner_dereference(node);
                }
                ExprListItem::Expression(node) => {
                    if !first {
                        self.writer.write(", ");
                    }
                    self.expr(0, &node.expr, Operand::TOP);
                }
            }
            first = false;
        }

        if force_parens {
            self.writer.write_char(')');
        }
    }

    fn expr_list_lines(
        &mut self,
        level: usize,
        start_line: usize,
        nodes: &[ExprListItem],
        columns: &mut CommentColumns,
    ) {
        let mut prev_line = start_line;

        for (i, node) in nodes.iter().enumerate() {
            self.indent_node(level, prev_line, node);

            match node {
                ExprListItem::AssignerDereference(node) => {
                    self.assigner_dereference(node);
                    self.writer.write_char(',');
                }
                ExprListItem::Comment(comment) if i == 0 => self.comment_alone(comment),
                ExprListItem::Comment(comment) => self.comment(level, comment, columns),
                ExprListItem::Expression(node) => {
                    self.expr(level + 1, &node.expr, Operand::TOP);
                    self.writer.write_char(',');
                }
            }

            prev_line = node.end_pos().line;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::format::format_source;

    fn fmt(source: &str) -> String {
        format_source("test.dp", source).unwrap()
    }

    fn fmt_value(expr: &str) -> String {
        let out = fmt(&format!("x = {expr}\n"));
        out.trim_end().strip_prefix("x = ").unwrap().to_string()
    }

    #[test]
    fn test_multiplicative_operands_are_tight() {
        assert_eq!(fmt_value("a + b * c"), "a + b*c");
        assert_eq!(fmt_value("a*b - c/d"), "a*b - c/d");
        assert_eq!(fmt_value("a * b * c"), "a * b * c");
    }

    #[test]
    fn test_parentheses_follow_tree_shape() {
        assert_eq!(fmt_value("(a + b) * c"), "(a + b) * c");
        assert_eq!(fmt_value("(a + b) == c"), "(a + b) == c");
        assert_eq!(fmt_value("a - (b - c)"), "a - (b - c)");
        assert_eq!(fmt_value("(a - b) - c"), "a - b - c");
        assert_eq!(fmt_value("x + (a + b)*c"), "x + (a+b)*c");
    }

    #[test]
    fn test_identity_is_dropped() {
        assert_eq!(fmt_value("+a"), "a");
        assert_eq!(fmt_value("c * +(a * b)"), "c * (a * b)");
    }

    #[test]
    fn test_ampersand_sequences_stay_separate() {
        assert_eq!(fmt_value("& &a"), "& &a");
        assert_eq!(fmt_value("&(^a)"), "& ^a");
        assert_eq!(fmt_value("x + a & ^b"), "x + a& ^b");
        assert_eq!(fmt_value("a && &b"), "a && &b");
    }

    #[test]
    fn test_prefix_operators() {
        assert_eq!(fmt_value("-a - -b"), "-a - -b");
        assert_eq!(fmt_value("!*p"), "!*p");
        assert_eq!(fmt_value("clone &(a + b)"), "clone &(a + b)");
    }

    #[test]
    fn test_parenthesized_name_with_operator_is_one_value() {
        let fmt_stmt = |stmt: &str| fmt(&format!("f() {{\n\t{stmt}\n}}\n"));
        let body = |stmt: &str| format!("f() () {{\n\t{stmt}\n}}\n");

        assert_eq!(fmt_stmt("x := (a) - b"), body("x := a - b"));
        assert_eq!(fmt_stmt("x = (a) * 2"), body("x = a * 2"));
        assert_eq!(fmt_stmt("return (n) - 1"), body("return n - 1"));
        assert_eq!(fmt_stmt("x = (a), (b)"), body("x = (a), (b)"));
    }

    #[test]
    fn test_literals_and_calls() {
        assert_eq!(
            fmt_value("f('c', \"s\", nil, {}, true, 31)"),
            "f('c', \"s\", nil, {}, true, 31)"
        );
        assert_eq!(fmt_value("a.b[i + 1]"), "a.b[i + 1]");
        assert_eq!(fmt_value("g()"), "g()");
    }

    #[test]
    fn test_multi_line_call_arguments() {
        assert_eq!(
            fmt("x = f(\n  a,   // first\n b, // second\n)\n"),
            "x = f(\n\ta, // first\n\tb, // second\n)\n"
        );
    }

    #[test]
    fn test_index_assignment_target_is_tight() {
        assert_eq!(
            fmt("f() {\n\ta[i + 1] = b + c\n}\n"),
            "f() () {\n\ta[i+1] = b + c\n}\n"
        );
    }
}
