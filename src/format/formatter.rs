//! File-level formatting for dp source code.
//!
//! Walks the top-level items and emits canonical text: the import section, constants,
//! functions and type definitions, each preceded by the comments that lead up to it.

use std::borrow::Cow;
use std::collections::HashMap;

use dp_core::lang::access::FieldAccess;
use dp_syntax::ast::{
    ConstantDef, FieldListItem, FileItem, FunctionDef, Node, ParamListItem, Stmt, TypeDef,
    TypeListItem,
};

use super::block::has_content;
use super::columns::{ColumnWidths, CommentColumns};
use super::comments::{Commented, Trailing, split_commented};
use super::expr::Operand;
use super::imports::import_section;
use super::writer::FormatWriter;

/// Identity of a rendered list: what kind of list, its indent level, and the byte offset and
/// length of its members.
type RenderKey = (&'static str, usize, usize, usize);

/// Formatter that turns a parsed file back into canonical source text.
#[derive(Debug, Default)]
pub struct Formatter {
    pub(super) writer: FormatWriter,
    /// Final text of nested lists, so an enclosing two-pass render reuses it.
    rendered: HashMap<RenderKey, String>,
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the items of a file and return the canonical text.
    pub fn format(mut self, nodes: &[FileItem]) -> String {
        self.file(nodes);
        self.writer.finish()
    }

    /// Render with `render`, throw the output away, and render again.
    ///
    /// The first pass settles the comment columns that depend on lines rendered later.
    pub(super) fn render_twice(&mut self, mut render: impl FnMut(&mut Self)) {
        let checkpoint = self.writer.checkpoint();
        render(self);
        self.writer.rewind(checkpoint);
        render(self);
    }

    /// Render a nested list once and replay the text when it is rendered again.
    ///
    /// A nested list starts on the line of its opening token and ends on its own line, so its
    /// text does not depend on the passes of the enclosing [`render_twice`](Self::render_twice).
    /// Without this, every nesting level would double the work.
    pub(super) fn render_cached<T: Node>(
        &mut self,
        kind: &'static str,
        level: usize,
        nodes: &[T],
        render: impl FnOnce(&mut Self),
    ) {
        let Some(first) = nodes.first() else {
            render(self);
            return;
        };
        let key = (kind, level, first.pos().byte_offset, nodes.len());

        if let Some(text) = self.rendered.get(&key) {
            self.writer.write(text);
            return;
        }

        let checkpoint = self.writer.checkpoint();
        render(self);
        let text = self.writer.since(checkpoint).to_string();
        self.rendered.insert(key, text);
    }

    // ========================================================================
    // File
    // ========================================================================

    fn file(&mut self, nodes: &[FileItem]) {
        let groups = split_commented(nodes, true, Some, file_trailing);
        let section = import_section(&groups);
        let mut written = false;

        for (i, group) in groups.iter().enumerate() {
            let at_section = section.as_ref().is_some_and(|section| section.index == i);
            let is_import = matches!(group.node, Some(FileItem::Import(_) | FileItem::Imports(_)));
            let has_own = !is_import && (!group.head.is_empty() || group.node.is_some());

            if !at_section && !has_own {
                continue;
            }

            if written && gap_before(&groups, i) {
                self.writer.newline();
            }
            written = true;

            if let Some(section) = section.as_ref().filter(|_| at_section) {
                self.import_section(section);
                if has_own {
                    self.writer.newline();
                }
            }

            if has_own {
                self.group(group);
            }
        }
    }

    fn group(&mut self, group: &Commented<'_, FileItem>) {
        for comment in &group.head {
            self.writer.write_trimmed(&comment.source);
            self.writer.newline();
        }

        match group.node {
            Some(FileItem::ConstantDef(def)) => self.constant_def(def, group),
            Some(FileItem::FunctionDef(def)) => self.function_def(def),
            Some(FileItem::TypeDef(def)) => self.type_def(def),
            Some(FileItem::Comment(_) | FileItem::Import(_) | FileItem::Imports(_)) | None => {}
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn constant_def(&mut self, def: &ConstantDef, group: &Commented<'_, FileItem>) {
        if def.public {
            self.writer.write("pub ");
        }
        self.writer.write(&def.name);
        self.writer.write(" = ");
        self.expr(1, &def.value, Operand::TOP);

        if let Some(comment) = group.tail.first() {
            self.writer.write_char(' ');
            self.writer.write_trimmed(&comment.source);
        }
        self.writer.newline();
    }

    fn function_def(&mut self, def: &FunctionDef) {
        if def.public {
            self.writer.write("pub ");
        }
        if let Some(spec) = &def.receiver_type {
            self.writer.write_char('(');
            if !def.receiver_name.is_empty() {
                self.writer.write(&def.receiver_name);
                self.writer.write_char(' ');
            }
            self.writer.write(&spec.ty.to_string());
            self.writer.write(") ");
        }
        self.writer.write(&def.name);

        self.function_params(def);
        self.function_results(def);

        let body = trim_function_body(def);
        if has_content(&body) {
            self.block(1, def.body_pos.line, &body);
        } else {
            self.writer.write("{}");
        }
        self.writer.newline();
    }

    fn function_params(&mut self, def: &FunctionDef) {
        let commented = def.params.iter().any(|node| node.as_comment().is_some());
        let params: Vec<_> = def.parameters().collect();

        self.writer.write_char('(');

        let one_line = params.first().is_none_or(|first| first.pos.line == def.pos.line);
        if !commented && one_line {
            for (i, param) in params.iter().enumerate() {
                if i > 0 {
                    self.writer.write(", ");
                }
                self.writer.write(&param.name);
                // `a, b int` gives both parameters the type written last
                let shared = params.get(i + 1).is_some_and(|next| next.ty.ty == param.ty.ty);
                if !shared {
                    self.writer.write_char(' ');
                    self.writer.write(&param.ty.ty.to_string());
                }
            }
        } else {
            let widths = ColumnWidths::measure(&def.params, param_columns);
            let mut comments = CommentColumns::new();
            self.render_twice(|f| f.function_param_lines(def, &widths, &mut comments));
            self.writer.newline();
        }

        self.writer.write(") ");
    }

    fn function_param_lines(
        &mut self,
        def: &FunctionDef,
        widths: &ColumnWidths,
        comments: &mut CommentColumns,
    ) {
        let mut prev_line = def.pos.line;

        for node in &def.params {
            self.indent_node(1, prev_line, node);

            match node {
                ParamListItem::Comment(comment) => self.comment(1, comment, comments),
                ParamListItem::Parameter(param) => {
                    let values = [param.name.clone(), param.ty.ty.to_string()];
                    self.columns(&values, &widths.row(param.pos.line));
                    self.writer.write_char(',');
                }
            }

            prev_line = node.end_pos().line;
        }
    }

    fn function_results(&mut self, def: &FunctionDef) {
        let commented = def.results.iter().any(|node| node.as_comment().is_some());
        let specs: Vec<_> = def.result_types().collect();

        match specs.as_slice() {
            [] if !commented => self.writer.write("() "),

            [spec] if !commented => {
                self.writer.write(&spec.ty.to_string());
                self.writer.write_char(' ');
            }

            [first, ..] if !commented && first.pos.line == def.params_end.line => {
                let types: Vec<_> = specs.iter().map(|spec| spec.ty.to_string()).collect();
                self.writer.write_char('(');
                self.writer.write(&types.join(", "));
                self.writer.write(") ");
            }

            _ => {
                self.writer.write_char('(');
                let mut comments = CommentColumns::new();
                self.render_twice(|f| f.function_result_lines(def, &mut comments));
                self.writer.write("\n) ");
            }
        }
    }

    fn function_result_lines(&mut self, def: &FunctionDef, comments: &mut CommentColumns) {
        let mut prev_line = def.params_end.line;

        for node in &def.results {
            self.indent_node(1, prev_line, node);

            match node {
                TypeListItem::Comment(comment) => self.comment(1, comment, comments),
                TypeListItem::TypeSpec(spec) => {
                    self.writer.write(&spec.ty.to_string());
                    self.writer.write_char(',');
                }
            }

            prev_line = node.end_pos().line;
        }
    }

    fn type_def(&mut self, def: &TypeDef) {
        if def.public {
            self.writer.write("pub ");
        }
        self.writer.write(&def.name);
        self.writer.write(" {");

        let empty = def
            .fields
            .iter()
            .all(|node| matches!(node, FieldListItem::Import(_)));

        if !empty {
            let widths = ColumnWidths::measure(&def.fields, field_columns);
            let mut comments = CommentColumns::new();
            self.render_twice(|f| f.type_fields(def, &widths, &mut comments));
            self.writer.newline();
        }

        self.writer.write("}\n");
    }

    fn type_fields(&mut self, def: &TypeDef, widths: &ColumnWidths, comments: &mut CommentColumns) {
        let mut prev_line = def.pos.line;

        for node in &def.fields {
            match node {
                FieldListItem::Import(import) => {
                    prev_line = import.end_pos().line;
                    continue;
                }
                FieldListItem::Comment(comment) => {
                    self.indent_node(1, prev_line, node);
                    self.comment(1, comment, comments);
                }
                FieldListItem::Field(_) => {
                    self.indent_node(1, prev_line, node);
                    if let Some((line, values)) = field_columns(node) {
                        self.columns(&values, &widths.row(line));
                    }
                }
            }

            prev_line = node.end_pos().line;
        }
    }
}

/// Which comments after a top-level item belong to it.
fn file_trailing(node: &FileItem) -> Trailing {
    match node {
        FileItem::ConstantDef(_) | FileItem::Import(_) | FileItem::Imports(_) => {
            Trailing::SameLine
        }
        _ => Trailing::None,
    }
}

/// Whether a blank line separates group `i` from the one before it.
///
/// Consecutive constants with the same visibility stay together.
fn gap_before(groups: &[Commented<'_, FileItem>], i: usize) -> bool {
    let prev = i.checked_sub(1).and_then(|prev| groups[prev].node);
    match (prev, groups[i].node) {
        (Some(FileItem::ConstantDef(prev)), Some(FileItem::ConstantDef(curr))) => {
            curr.pos.line.saturating_sub(prev.end.line) > 1 || curr.public != prev.public
        }
        _ => true,
    }
}

fn param_columns(node: &ParamListItem) -> Option<(usize, Vec<String>)> {
    match node {
        ParamListItem::Parameter(param) => Some((
            param.pos.line,
            vec![param.name.clone(), param.ty.ty.to_string()],
        )),
        ParamListItem::Comment(_) => None,
    }
}

fn field_columns(node: &FieldListItem) -> Option<(usize, Vec<String>)> {
    match node {
        FieldListItem::Field(field) => {
            let mut values = vec![field.name.clone(), field.ty.ty.to_string()];
            if field.access != FieldAccess::Hidden {
                values.push(field.access.to_string());
            }
            Some((field.pos.line, values))
        }
        FieldListItem::Comment(_) | FieldListItem::Import(_) => None,
    }
}

/// Drop value-less `return` statements that end a function without results.
///
/// Comments and hoisted imports between them do not stop the trimming.
fn trim_function_body(def: &FunctionDef) -> Cow<'_, [Stmt]> {
    if !def.results.is_empty() {
        return Cow::Borrowed(&def.body);
    }

    let mut body = Cow::Borrowed(def.body.as_slice());
    let mut i = body.len();

    while i > 0 {
        i -= 1;
        match &body[i] {
            Stmt::Comment(_) | Stmt::Import(_) => {}
            Stmt::Return(stmt) if stmt.values.is_empty() => {
                body.to_mut().remove(i);
            }
            _ => break,
        }
    }

    body
}
