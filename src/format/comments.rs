//! Attaching comments to the nodes around them.
//!
//! Lists in the AST carry comments as ordinary members. Before rendering, a list is split into
//! [`Commented`] groups: the comments leading up to a node, the node itself, and the comments
//! that trail it.

use dp_syntax::ast::{Comment, Node};

use super::Formatter;
use super::columns::CommentColumns;

/// Which comments after a node belong to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trailing {
    None,
    /// One comment on the node's last line.
    SameLine,
    /// A comment on the node's last line plus the comments on each following line.
    Run,
}

/// A node with the comments around it. `node` is `None` for comments that precede nothing.
#[derive(Debug)]
pub struct Commented<'n, R> {
    pub head: Vec<&'n Comment>,
    pub node: Option<&'n R>,
    pub tail: Vec<&'n Comment>,
}

impl<R> Default for Commented<'_, R> {
    fn default() -> Self {
        Self {
            head: Vec::new(),
            node: None,
            tail: Vec::new(),
        }
    }
}

/// Split a list into commented groups.
///
/// A group ends after each node. With `split_on_gap`, a blank line also ends the group, so
/// comments separated from the next node stay on their own.
pub fn split_commented<'n, T, R>(
    nodes: &'n [T],
    split_on_gap: bool,
    substance: impl Fn(&'n T) -> Option<&'n R>,
    trailing: impl Fn(&R) -> Trailing,
) -> Vec<Commented<'n, R>>
where
    T: Node,
{
    let mut groups = Vec::new();
    let mut group = Commented::default();
    let mut i = 0;

    while i < nodes.len() {
        let curr = &nodes[i];
        match curr.as_comment() {
            Some(comment) => group.head.push(comment),
            None => group.node = substance(curr),
        }

        let Some(next) = nodes.get(i + 1) else {
            break;
        };

        let step = line_step(curr, next);
        let mut split = false;

        if split_on_gap && step >= 2 {
            split = true;
        } else if let Some(node) = group.node {
            if step == 0 {
                if let Some(comment) = next.as_comment() {
                    match trailing(node) {
                        Trailing::None => {}
                        Trailing::SameLine => {
                            group.tail.push(comment);
                            i += 1;
                        }
                        Trailing::Run => {
                            group.tail.push(comment);
                            i += 1;
                            while let Some(following) = nodes.get(i + 1) {
                                let Some(comment) = following.as_comment() else {
                                    break;
                                };
                                if line_step(&nodes[i], following) != 1 {
                                    break;
                                }
                                group.tail.push(comment);
                                i += 1;
                            }
                        }
                    }
                }
            }
            split = true;
        }

        if split {
            groups.push(std::mem::take(&mut group));
        }
        i += 1;
    }

    if !group.head.is_empty() || group.node.is_some() {
        groups.push(group);
    }

    groups
}

/// Lines between the end of `curr` and the start of `next`.
fn line_step(curr: &impl Node, next: &impl Node) -> usize {
    next.pos().line.saturating_sub(curr.end_pos().line)
}

impl Formatter {
    // ========================================================================
    // Comments
    // ========================================================================

    /// Write a comment aligned with the trailing comments of neighbouring lines.
    pub(super) fn comment(&mut self, level: usize, comment: &Comment, columns: &mut CommentColumns) {
        let line_len = self.writer.current_line_len();
        let column = columns.place(comment.pos.line, level, line_len);
        self.writer.pad(column.saturating_sub(line_len));
        self.writer.write_trimmed(&comment.source);
    }

    /// Write a comment without alignment.
    pub(super) fn comment_alone(&mut self, comment: &Comment) {
        self.writer.write_trimmed(&comment.source);
    }

    /// Separate `node` from the previous line: comments on the same line follow after a space,
    /// one line apart starts a new line, and a larger gap keeps one blank line.
    pub(super) fn indent_node(&mut self, level: usize, prev_line: usize, node: &impl Node) {
        let step = node.pos().line as isize - prev_line as isize;

        if step == 0 && node.as_comment().is_some() {
            self.writer.write_char(' ');
            return;
        }

        if step > 1 {
            self.writer.newline();
        }
        self.writer.newline();
        self.writer.indent(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dp_syntax::ast::{IdentListItem, Identifier};
    use dp_syntax::lexer;
    use dp_syntax::parser;
    use dp_syntax::source::Position;
    use dp_syntax::ast::FileItem;

    fn import_names(source: &str) -> Vec<IdentListItem> {
        let tokens = lexer::tokenize(Position::location("test.dp"), source).unwrap();
        let items = parser::parse(&tokens).unwrap();
        let Some(FileItem::Imports(imports)) = items.into_iter().next() else {
            panic!("expected import list");
        };
        let Some(dp_syntax::ast::ImportListItem::Import(import)) = imports.imports.into_iter().next()
        else {
            panic!("expected import");
        };
        import.names
    }

    fn identifier(node: &IdentListItem) -> Option<&Identifier> {
        match node {
            IdentListItem::Identifier(ident) => Some(ident),
            IdentListItem::Comment(_) => None,
        }
    }

    fn summary(groups: &[Commented<'_, Identifier>]) -> Vec<String> {
        groups
            .iter()
            .map(|g| {
                let head: Vec<_> = g.head.iter().map(|c| c.source.as_str()).collect();
                let tail: Vec<_> = g.tail.iter().map(|c| c.source.as_str()).collect();
                let node = g.node.map_or(String::from("-"), |n| n.name.to_string());
                format!("{head:?} {node} {tail:?}")
            })
            .collect()
    }

    #[test]
    fn test_identifier_takes_comment_run() {
        let names = import_names(
            "import {\n\t\"p\" (\n\t\t// lead\n\t\ta, // one\n\t\t// two\n\n\t\t// three\n\t\tb,\n\t\t// end\n\t)\n}\n",
        );
        let groups = split_commented(&names, false, identifier, |_| Trailing::Run);
        assert_eq!(
            summary(&groups),
            vec![
                r#"["// lead"] a ["// one", "// two"]"#,
                r#"["// three"] b []"#,
                r#"["// end"] - []"#,
            ]
        );
    }

    #[test]
    fn test_same_line_takes_one_comment() {
        let names = import_names("import {\n\t\"p\" (\n\t\ta, // one\n\t\t// two\n\t\tb,\n\t)\n}\n");
        let groups = split_commented(&names, false, identifier, |_| Trailing::SameLine);
        assert_eq!(
            summary(&groups),
            vec![r#"[] a ["// one"]"#, r#"["// two"] b []"#]
        );
    }

    #[test]
    fn test_gap_splits_comment_groups() {
        let names = import_names("import {\n\t\"p\" (\n\t\t// alone\n\n\t\t// lead\n\t\ta,\n\t)\n}\n");
        let groups = split_commented(&names, true, identifier, |_| Trailing::None);
        assert_eq!(
            summary(&groups),
            vec![r#"["// alone"] - []"#, r#"["// lead"] a []"#]
        );
    }
}
