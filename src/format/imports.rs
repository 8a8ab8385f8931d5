//! Import hoisting, resolution and ordering.
//!
//! Every import in a file, including those nested in function bodies and type bodies, is merged
//! into a single `import { ... }` section.
//!
//! ## Notes
//! - Path-less imports name identifiers such as `(io::Reader)`; when exactly one imported path
//!   provides the namespace `io`, the name moves under that path as `Reader`.
//! - Imports are grouped by path kind (local, domain-qualified, `internal/...`) with a blank line
//!   between groups, and sorted by path within a group.
//! - Duplicate paths merge unless their trailing comments differ; duplicate names merge too.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use dp_syntax::ast::{
    Comment, FieldListItem, FileItem, IdentListItem, Identifier, Import, ImportListItem,
    QualifiedName, Stmt,
};

use super::Formatter;
use super::comments::{Commented, Trailing, split_commented};

/// The rendered import section of a file.
#[derive(Debug)]
pub(super) struct ImportSection {
    /// Group before which the section is written.
    pub index: usize,
    pub head: Vec<Comment>,
    pub entries: Vec<ImportEntry>,
    /// Comments that belong to no import; written at the end of the section.
    pub extra: Vec<Comment>,
}

#[derive(Debug)]
pub(super) struct ImportEntry {
    pub head: Vec<Comment>,
    pub path: Option<String>,
    pub names: Vec<ImportName>,
    pub names_extra: Vec<Comment>,
    pub tail: Vec<Comment>,
}

impl ImportEntry {
    fn names_commented(&self) -> bool {
        !self.names_extra.is_empty()
            || self
                .names
                .iter()
                .any(|name| !name.head.is_empty() || !name.tail.is_empty())
    }
}

#[derive(Debug)]
pub(super) struct ImportName {
    pub head: Vec<Comment>,
    pub name: String,
    pub tail: Vec<Comment>,
}

/// An import as collected, before merging.
#[derive(Debug)]
struct Pending {
    head: Vec<Comment>,
    path: Option<String>,
    names: Vec<IdentListItem>,
    tail: Vec<Comment>,
}

impl Pending {
    fn new(head: &[&Comment], import: &Import, tail: &[&Comment]) -> Self {
        Self {
            head: head.iter().map(|&c| c.clone()).collect(),
            path: import.path.clone(),
            names: import.names.clone(),
            tail: tail.iter().map(|&c| c.clone()).collect(),
        }
    }

    fn nested(import: &Import) -> Self {
        Self::new(&[], import, &[])
    }
}

// ============================================================================
// Collection
// ============================================================================

/// Collect the import section of a file, or `None` when the file has no imports.
///
/// The section goes where the first import list was, but never after the first constant,
/// function or type.
pub(super) fn import_section(groups: &[Commented<'_, FileItem>]) -> Option<ImportSection> {
    let mut head = Vec::new();
    let mut list = Vec::new();
    let mut extra = Vec::new();

    let mut first_import = None;
    let mut first_imports = None;
    let mut first_substance = None;

    for (i, group) in groups.iter().enumerate() {
        let Some(node) = group.node else {
            continue;
        };

        match node {
            FileItem::Comment(_) => {}
            FileItem::ConstantDef(_) => {
                first_substance.get_or_insert(i);
            }
            FileItem::FunctionDef(def) => {
                first_substance.get_or_insert(i);
                collect_nested(&def.body, &mut list);
            }
            FileItem::Import(import) => {
                first_import.get_or_insert(i);
                list.push(Pending::new(&group.head, import, &group.tail));
            }
            FileItem::Imports(imports) => {
                first_imports.get_or_insert(i);
                head.extend(group.head.iter().map(|&c| c.clone()));

                let start = list.len();
                let entries = split_commented(&imports.imports, false, import_item, |_| {
                    Trailing::SameLine
                });
                for entry in entries {
                    match entry.node {
                        Some(import) => list.push(Pending::new(&entry.head, import, &entry.tail)),
                        None => extra.extend(entry.head.into_iter().cloned()),
                    }
                }

                // A comment after the list stays with its last import
                let tail = group.tail.iter().map(|&c| c.clone());
                match list[start..].last_mut() {
                    Some(last) => last.tail.extend(tail),
                    None => extra.extend(tail),
                }
            }
            FileItem::TypeDef(def) => {
                first_substance.get_or_insert(i);
                for field in &def.fields {
                    if let FieldListItem::Import(import) = field {
                        list.push(Pending::nested(import));
                    }
                }
            }
        }
    }

    let index = match (first_imports.or(first_import), first_substance) {
        (Some(i), Some(s)) => i.min(s),
        (Some(i), None) => i,
        (None, Some(s)) if !list.is_empty() => s,
        _ => return None,
    };

    let list = resolve_imports(list, &mut extra);
    let entries = merge_imports(list, &mut extra);

    tracing::trace!(index, entries = entries.len(), "import section");

    Some(ImportSection {
        index,
        head,
        entries,
        extra,
    })
}

fn import_item(node: &ImportListItem) -> Option<&Import> {
    match node {
        ImportListItem::Import(import) => Some(import),
        ImportListItem::Comment(_) => None,
    }
}

fn identifier(node: &IdentListItem) -> Option<&Identifier> {
    match node {
        IdentListItem::Identifier(ident) => Some(ident),
        IdentListItem::Comment(_) => None,
    }
}

/// Imports anywhere in a function body, including nested blocks, loops and branches.
fn collect_nested(body: &[Stmt], list: &mut Vec<Pending>) {
    for node in body {
        match node {
            Stmt::Import(import) => list.push(Pending::nested(import)),
            Stmt::Block(block) => collect_nested(&block.body, list),
            Stmt::For(stmt) => collect_nested(&stmt.body, list),
            Stmt::If(stmt) => {
                collect_nested(&stmt.then_body, list);
                collect_nested(&stmt.else_body, list);
            }
            _ => {}
        }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Move path-less names under the import whose path provides their namespace.
///
/// A path-less import keeps the names that cannot be resolved. When all of its names resolve,
/// its comments join the section's extra comments.
fn resolve_imports(list: Vec<Pending>, extra: &mut Vec<Comment>) -> Vec<Pending> {
    let mut namespaces: BTreeMap<String, Option<String>> = BTreeMap::new();

    for pending in &list {
        let Some(path) = &pending.path else {
            continue;
        };
        let Some(unquoted) = unquote_import_path(path) else {
            continue;
        };
        for namespace in import_path_namespaces(unquoted) {
            match namespaces.entry(namespace) {
                Entry::Vacant(entry) => {
                    entry.insert(Some(path.clone()));
                }
                Entry::Occupied(mut entry) => {
                    if entry.get().as_ref() != Some(path) {
                        // ambiguous
                        entry.insert(None);
                    }
                }
            }
        }
    }

    let mut resolved: BTreeMap<String, Vec<IdentListItem>> = BTreeMap::new();
    let mut kept = Vec::with_capacity(list.len());

    for mut pending in list {
        if pending.path.is_some() {
            kept.push(pending);
            continue;
        }

        let mut rest = Vec::new();
        let mut unresolved = false;

        for node in std::mem::take(&mut pending.names) {
            let ident = match node {
                IdentListItem::Identifier(ident) => ident,
                comment @ IdentListItem::Comment(_) => {
                    rest.push(comment);
                    continue;
                }
            };

            match namespaces.get(&ident.name.namespace()) {
                Some(Some(path)) => {
                    let short = Identifier {
                        name: QualifiedName(vec![ident.name.short().to_string()]),
                        ..ident
                    };
                    resolved.entry(path.clone()).or_default().push(short.into());
                }
                _ => {
                    unresolved = true;
                    rest.push(ident.into());
                }
            }
        }

        if unresolved {
            pending.names = rest;
            kept.push(pending);
        } else {
            extra.extend(pending.head);
            extra.extend(rest.into_iter().filter_map(|node| match node {
                IdentListItem::Comment(comment) => Some(comment),
                IdentListItem::Identifier(_) => None,
            }));
            extra.extend(pending.tail);
        }
    }

    for (path, names) in resolved {
        kept.push(Pending {
            head: Vec::new(),
            path: Some(path),
            names,
            tail: Vec::new(),
        });
    }

    kept
}

/// Strip the quotes of an import path. Paths with escapes cannot name a namespace.
pub fn unquote_import_path(path: &str) -> Option<&str> {
    let inner = path.strip_prefix('"')?.strip_suffix('"')?;
    (!inner.contains('\\')).then_some(inner)
}

/// Namespaces an import path provides: each suffix of its segments joined with `::`, plus
/// the fully qualified form with a leading `::`.
///
/// Segments are lowercased and `-` and `.` become `_`, so `"example.org/Foo-bar"` provides
/// `foo_bar`, `example_org::foo_bar` and `::example_org::foo_bar`. Malformed paths provide
/// nothing.
pub fn import_path_namespaces(path: &str) -> Vec<String> {
    if path.is_empty() || path.starts_with('/') || path.ends_with('/') || path.contains("//") {
        return Vec::new();
    }

    let normalized: String = path
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == '.' { '_' } else { c })
        .collect();

    let mut segments = vec![""];
    segments.extend(normalized.split('/'));

    (0..segments.len())
        .map(|i| segments[i..].join("::"))
        .collect()
}

/// Sort group of an import path: 1 for local paths, 2 for paths whose root contains a dot,
/// 3 for `internal/...`.
pub fn import_path_group(path: Option<&str>) -> u8 {
    let Some(path) = path else {
        return 1;
    };
    let path = path.trim_matches('"');
    let root = path.split('/').next().unwrap_or_default();

    if root == "internal" {
        3
    } else if root.contains('.') {
        2
    } else {
        1
    }
}

// ============================================================================
// Merging
// ============================================================================

/// Merge imports with the same path and trailing comment, and sort them.
///
/// Imports that end up with neither a path nor a name give their comments to `extra`.
fn merge_imports(list: Vec<Pending>, extra: &mut Vec<Comment>) -> Vec<ImportEntry> {
    let mut merged: BTreeMap<(u8, Option<String>, String), Pending> = BTreeMap::new();

    for pending in list {
        if pending.path.is_none() && !pending.names.iter().any(|n| identifier(n).is_some()) {
            extra.extend(pending.head);
            extra.extend(pending.names.into_iter().filter_map(|node| match node {
                IdentListItem::Comment(comment) => Some(comment),
                IdentListItem::Identifier(_) => None,
            }));
            extra.extend(pending.tail);
            continue;
        }

        let comment = pending
            .tail
            .first()
            .map(|c| c.source.trim().to_string())
            .unwrap_or_default();
        let key = (
            import_path_group(pending.path.as_deref()),
            pending.path.clone(),
            comment,
        );

        match merged.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(pending);
            }
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.head.extend(pending.head);
                existing.names.extend(pending.names);
            }
        }
    }

    merged
        .into_values()
        .map(|pending| {
            let (names, names_extra) = merge_import_names(&pending.names);
            ImportEntry {
                head: pending.head,
                path: pending.path,
                names,
                names_extra,
                tail: pending.tail,
            }
        })
        .collect()
}

/// Deduplicate and sort the names of one import, keeping their comments.
fn merge_import_names(names: &[IdentListItem]) -> (Vec<ImportName>, Vec<Comment>) {
    let mut merged: BTreeMap<String, ImportName> = BTreeMap::new();
    let mut extra = Vec::new();

    for group in split_commented(names, false, identifier, |_| Trailing::Run) {
        let head = group.head.into_iter().cloned();
        let Some(ident) = group.node else {
            extra.extend(head);
            continue;
        };
        let tail = group.tail.into_iter().cloned();

        let name = ident.name.to_string();
        match merged.entry(name.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(ImportName {
                    head: head.collect(),
                    name,
                    tail: tail.collect(),
                });
            }
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.head.extend(head);
                existing.tail.extend(tail);
            }
        }
    }

    (merged.into_values().collect(), extra)
}

// ============================================================================
// Rendering
// ============================================================================

impl Formatter {
    pub(super) fn import_section(&mut self, section: &ImportSection) {
        for comment in &section.head {
            self.writer.write_trimmed(&comment.source);
            self.writer.newline();
        }

        self.writer.write("import {\n");

        let mut prev_group = None;
        for entry in &section.entries {
            let group = import_path_group(entry.path.as_deref());
            if prev_group.is_some_and(|prev| prev != group) {
                self.writer.newline();
            }
            prev_group = Some(group);

            self.import_entry(entry);
        }

        if !section.extra.is_empty() {
            self.writer.newline();
            for comment in &section.extra {
                self.writer.write_char('\t');
                self.writer.write_trimmed(&comment.source);
                self.writer.newline();
            }
        }

        self.writer.write("}\n");
    }

    fn import_entry(&mut self, entry: &ImportEntry) {
        for comment in &entry.head {
            self.writer.write_char('\t');
            self.writer.write_trimmed(&comment.source);
            self.writer.newline();
        }

        self.writer.write_char('\t');
        if let Some(path) = &entry.path {
            self.writer.write(path);
        }

        if !entry.names.is_empty() || !entry.names_extra.is_empty() {
            if entry.path.is_some() {
                self.writer.write_char(' ');
            }
            self.import_names(entry);
        }

        if let Some(comment) = entry.tail.first() {
            self.writer.write_char(' ');
            self.writer.write_trimmed(&comment.source);
        }
        self.writer.newline();
    }

    /// `(a, b)` on one line, or one name per line when comments are attached.
    fn import_names(&mut self, entry: &ImportEntry) {
        if !entry.names_commented() {
            let names: Vec<_> = entry.names.iter().map(|n| n.name.as_str()).collect();
            self.writer.write_char('(');
            self.writer.write(&names.join(", "));
            self.writer.write_char(')');
            return;
        }

        self.writer.write("(\n");

        for name in &entry.names {
            for comment in &name.head {
                self.writer.write("\t\t");
                self.writer.write_trimmed(&comment.source);
                self.writer.newline();
            }

            self.writer.write("\t\t");
            self.writer.write(&name.name);
            self.writer.write_char(',');

            let mut tail = name.tail.iter();
            if let Some(comment) = tail.next() {
                self.writer.write_char(' ');
                self.writer.write_trimmed(&comment.source);
            }
            self.writer.newline();
            for comment in tail {
                self.writer.write("\t\t");
                self.writer.write_trimmed(&comment.source);
                self.writer.newline();
            }
        }

        for comment in &entry.names_extra {
            self.writer.write("\t\t");
            self.writer.write_trimmed(&comment.source);
            self.writer.newline();
        }

        self.writer.write("\t)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_source;

    fn fmt(source: &str) -> String {
        format_source("test.dp", source).unwrap()
    }

    #[test]
    fn test_import_path_namespaces() {
        assert_eq!(
            import_path_namespaces("Example.org/foo-bar/Baz"),
            vec![
                "::example_org::foo_bar::baz",
                "example_org::foo_bar::baz",
                "foo_bar::baz",
                "baz",
            ]
        );
        assert!(import_path_namespaces("/abs").is_empty());
        assert!(import_path_namespaces("dir/").is_empty());
        assert!(import_path_namespaces("a//b").is_empty());
    }

    #[test]
    fn test_unquote_import_path() {
        assert_eq!(unquote_import_path("\"a/b\""), Some("a/b"));
        assert_eq!(unquote_import_path("\"a\\\\b\""), None);
        assert_eq!(unquote_import_path("a"), None);
    }

    #[test]
    fn test_import_path_group() {
        assert_eq!(import_path_group(Some("\"fmt\"")), 1);
        assert_eq!(import_path_group(Some("\"a/b.c\"")), 1);
        assert_eq!(import_path_group(Some("\"example.org/x\"")), 2);
        assert_eq!(import_path_group(Some("\"internal/x\"")), 3);
        assert_eq!(import_path_group(None), 1);
    }

    #[test]
    fn test_imports_are_grouped_and_sorted() {
        assert_eq!(
            fmt("import \"internal/z\", \"example.org/y\", \"b\", \"a\"\n"),
            "import {\n\t\"a\"\n\t\"b\"\n\n\t\"example.org/y\"\n\n\t\"internal/z\"\n}\n"
        );
    }

    #[test]
    fn test_duplicate_paths_and_names_merge() {
        assert_eq!(
            fmt("import {\n\t\"a\" (Y, X)\n\t\"a\" (X)\n}\n"),
            "import {\n\t\"a\" (X, Y)\n}\n"
        );
    }

    #[test]
    fn test_path_less_names_resolve_by_namespace() {
        assert_eq!(
            fmt("import {\n\t\"example.org/io\"\n\t(io::Reader, other::Thing)\n}\n"),
            "import {\n\t(other::Thing)\n\n\t\"example.org/io\" (Reader)\n}\n"
        );
    }

    #[test]
    fn test_ambiguous_namespace_stays_unresolved() {
        assert_eq!(
            fmt("import {\n\t\"x/io\"\n\t\"y/io\"\n\t(io::R)\n}\n"),
            "import {\n\t(io::R)\n\t\"x/io\"\n\t\"y/io\"\n}\n"
        );
    }

    #[test]
    fn test_nested_imports_are_hoisted() {
        assert_eq!(
            fmt("x = 1\n\nT {\n\timport \"t\"\n\ta int\n}\n\nf() {\n\tif c {\n\t\timport \"f\"\n\t\tg()\n\t}\n}\n"),
            "import {\n\t\"f\"\n\t\"t\"\n}\n\nx = 1\n\nT {\n\ta int\n}\n\nf() () {\n\tif c {\n\t\tg()\n\t}\n}\n"
        );
    }

    #[test]
    fn test_same_line_comment_follows_import_list() {
        assert_eq!(
            fmt("import \"a\" // why\n\nf() {}\n"),
            "import {\n\t\"a\" // why\n}\n\nf() () {}\n"
        );
        assert_eq!(
            fmt("import \"b\", \"a\" // why\n"),
            "import {\n\t\"a\"\n\t\"b\" // why\n}\n"
        );
    }

    #[test]
    fn test_import_comments_are_kept() {
        let source = "// imports\nimport {\n\t// lead\n\t\"b\" // b\n\t\"a\" (\n\t\tY, // why\n\t\tX,\n\t)\n\t// loose\n}\n";
        let expected = "// imports\nimport {\n\t\"a\" (\n\t\tX,\n\t\tY, // why\n\t)\n\t// lead\n\t\"b\" // b\n\n\t// loose\n}\n";
        assert_eq!(fmt(source), expected);
        assert_eq!(fmt(expected), expected);
    }
}
