//! Abstract Syntax Tree definitions for dp.
//!
//! Every node records where it starts and where it ends. Nodes are grouped into closed category
//! enums ([`Expr`], [`Stmt`], [`FileItem`], ...) that mirror where the grammar allows them; a node
//! type may belong to several categories (a [`Comment`] is a member of most lists).
//!
//! ## Notes
//! - Comments are ordinary list members. The formatter decides which node they belong to.
//! - Dispatch over a category is an exhaustive `match`; adding a node kind fails the build at
//!   every site that has not been taught about it.
//! - `dump()` renders a compact single-line form used by tests and `dpfmt --ast`.

use std::fmt;

use crate::source::Position;
use dp_core::lang::access::FieldAccess;
use dp_core::lang::operators::{self, OperatorId};

/// Common behavior of every node and category.
pub trait Node {
    /// Human-readable kind, e.g. `"function call"`.
    fn kind_name(&self) -> &'static str;

    fn pos(&self) -> &Position;

    /// Position just past the node, which is where the next non-space token starts.
    fn end_pos(&self) -> Position;

    /// Compact debug rendering.
    fn dump(&self) -> String;

    fn as_comment(&self) -> Option<&Comment> {
        None
    }
}

/// Implement [`Node`] for a struct with `pos` and `end` fields.
macro_rules! spanned_node {
    ($ty:ident, $kind:literal, |$x:ident| $dump:expr) => {
        impl Node for $ty {
            fn kind_name(&self) -> &'static str {
                $kind
            }

            fn pos(&self) -> &Position {
                &self.pos
            }

            fn end_pos(&self) -> Position {
                self.end.clone()
            }

            fn dump(&self) -> String {
                let $x = self;
                $dump
            }
        }
    };
}

/// Define a category enum whose variants wrap node types, delegating [`Node`] to the variant.
macro_rules! node_category {
    ($(#[$meta:meta])* $name:ident { $($variant:ident($ty:ty)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $($variant($ty)),+
        }

        impl Node for $name {
            fn kind_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(node) => node.kind_name()),+
                }
            }

            fn pos(&self) -> &Position {
                match self {
                    $(Self::$variant(node) => node.pos()),+
                }
            }

            fn end_pos(&self) -> Position {
                match self {
                    $(Self::$variant(node) => node.end_pos()),+
                }
            }

            fn dump(&self) -> String {
                match self {
                    $(Self::$variant(node) => node.dump()),+
                }
            }

            fn as_comment(&self) -> Option<&Comment> {
                match self {
                    $(Self::$variant(node) => node.as_comment()),+
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(node: $ty) -> Self {
                    Self::$variant(node)
                }
            }
        )+
    };
}

// ============================================================================
// CATEGORIES
// ============================================================================

node_category! {
    /// Expression.
    Expr {
        Address(Address),
        Binary(Binary),
        Boolean(Boolean),
        Call(Call),
        Character(Character),
        Clone(CloneExpr),
        Index(Index),
        Integer(Integer),
        Nil(Nil),
        PointerDereference(PointerDereference),
        Selector(Selector),
        String(StringLiteral),
        Unary(Unary),
        Zero(Zero),
    }
}

node_category! {
    /// Left-hand side of an assignment.
    AssignTarget {
        AssignerDereference(AssignerDereference),
        Call(Call),
        Index(Index),
        Selector(Selector),
    }
}

node_category! {
    /// Statement inside a block.
    Stmt {
        Assign(Assign),
        Block(Block),
        Break(Break),
        Comment(Comment),
        Continue(Continue),
        Expression(Expression),
        For(For),
        If(If),
        Import(Import),
        Return(Return),
        VariableDecl(VariableDecl),
        VariableDef(VariableDef),
    }
}

node_category! {
    /// Member of a value list (call arguments, return values, right-hand sides).
    ExprListItem {
        AssignerDereference(AssignerDereference),
        Comment(Comment),
        Expression(Expression),
    }
}

node_category! {
    /// Member of a type body.
    FieldListItem {
        Comment(Comment),
        Field(Field),
        Import(Import),
    }
}

node_category! {
    /// Top-level item of a source file.
    FileItem {
        Comment(Comment),
        ConstantDef(ConstantDef),
        FunctionDef(FunctionDef),
        Import(Import),
        Imports(Imports),
        TypeDef(TypeDef),
    }
}

node_category! {
    /// Member of an import's name list.
    IdentListItem {
        Comment(Comment),
        Identifier(Identifier),
    }
}

node_category! {
    /// Member of an import list.
    ImportListItem {
        Comment(Comment),
        Import(Import),
    }
}

node_category! {
    /// Member of a parameter list.
    ParamListItem {
        Comment(Comment),
        Parameter(Parameter),
    }
}

node_category! {
    /// Member of a result type list.
    TypeListItem {
        Comment(Comment),
        TypeSpec(TypeSpec),
    }
}

// ============================================================================
// NAMES AND TYPES
// ============================================================================

/// `::`-separated name. A leading `::` is stored as an empty first segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct QualifiedName(pub Vec<String>);

impl QualifiedName {
    /// Everything but the last segment, joined with `::`.
    pub fn namespace(&self) -> String {
        match self.0.split_last() {
            Some((_, init)) => init.join("::"),
            None => String::new(),
        }
    }

    /// Last segment.
    pub fn short(&self) -> &str {
        self.0.last().map_or("", String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("::"))
    }
}

/// Type expression.
///
/// Exactly one of `item` (array element type) and `name` is meaningful. Equality compares every
/// flag and, recursively, the item or name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Type {
    pub assigner: bool,
    pub pointer: bool,
    pub reference: bool,
    pub shared: bool,
    pub item: Option<Box<Type>>,
    pub name: QualifiedName,
}

impl Type {
    /// Named type without flags.
    pub fn named(name: QualifiedName) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Whether the source spelled a type at all.
    pub fn is_specified(&self) -> bool {
        self.item.is_some() || !self.name.is_empty()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.assigner {
            f.write_str("=")?;
        }
        if self.pointer {
            f.write_str("*")?;
        }
        if self.reference {
            f.write_str("&")?;
        }
        if self.shared {
            f.write_str("#")?;
        }
        match &self.item {
            Some(item) => write!(f, "[{item}]"),
            None => write!(f, "{}", self.name),
        }
    }
}

// ============================================================================
// OPERATORS
// ============================================================================

/// Binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    AndNot,
    BitOr,
    BitXor,
    Shl,
    Shr,
    LogicalAnd,
    LogicalOr,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl BinaryOp {
    pub fn from_operator(id: OperatorId) -> Option<Self> {
        let op = match id {
            OperatorId::Plus => BinaryOp::Add,
            OperatorId::Minus => BinaryOp::Sub,
            OperatorId::Star => BinaryOp::Mul,
            OperatorId::Slash => BinaryOp::Div,
            OperatorId::Percent => BinaryOp::Rem,
            OperatorId::Amp => BinaryOp::BitAnd,
            OperatorId::AmpCaret => BinaryOp::AndNot,
            OperatorId::Pipe => BinaryOp::BitOr,
            OperatorId::Caret => BinaryOp::BitXor,
            OperatorId::LtLt => BinaryOp::Shl,
            OperatorId::GtGt => BinaryOp::Shr,
            OperatorId::AndAnd => BinaryOp::LogicalAnd,
            OperatorId::OrOr => BinaryOp::LogicalOr,
            OperatorId::EqEq => BinaryOp::Eq,
            OperatorId::NotEq => BinaryOp::NotEq,
            OperatorId::Lt => BinaryOp::Less,
            OperatorId::LtEq => BinaryOp::LessEq,
            OperatorId::Gt => BinaryOp::Greater,
            OperatorId::GtEq => BinaryOp::GreaterEq,
            OperatorId::Bang => return None,
        };
        Some(op)
    }

    pub fn operator(self) -> OperatorId {
        match self {
            BinaryOp::Add => OperatorId::Plus,
            BinaryOp::Sub => OperatorId::Minus,
            BinaryOp::Mul => OperatorId::Star,
            BinaryOp::Div => OperatorId::Slash,
            BinaryOp::Rem => OperatorId::Percent,
            BinaryOp::BitAnd => OperatorId::Amp,
            BinaryOp::AndNot => OperatorId::AmpCaret,
            BinaryOp::BitOr => OperatorId::Pipe,
            BinaryOp::BitXor => OperatorId::Caret,
            BinaryOp::Shl => OperatorId::LtLt,
            BinaryOp::Shr => OperatorId::GtGt,
            BinaryOp::LogicalAnd => OperatorId::AndAnd,
            BinaryOp::LogicalOr => OperatorId::OrOr,
            BinaryOp::Eq => OperatorId::EqEq,
            BinaryOp::NotEq => OperatorId::NotEq,
            BinaryOp::Less => OperatorId::Lt,
            BinaryOp::LessEq => OperatorId::LtEq,
            BinaryOp::Greater => OperatorId::Gt,
            BinaryOp::GreaterEq => OperatorId::GtEq,
        }
    }

    /// Precedence tier, 1 (`||`) through 5 (multiplicative).
    ///
    /// ## Panics
    /// - If the operator registry lost the tier of a binary operator (a programming error).
    pub fn precedence(self) -> u8 {
        operators::binary_precedence(self.operator()).expect("binary operator without precedence")
    }

    pub fn as_str(self) -> &'static str {
        operators::as_str(self.operator())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `+`
    Identity,
    /// `-`
    Negate,
    /// `^`
    Complement,
    /// `!`
    Not,
}

impl UnaryOp {
    pub fn from_operator(id: OperatorId) -> Option<Self> {
        match id {
            OperatorId::Plus => Some(UnaryOp::Identity),
            OperatorId::Minus => Some(UnaryOp::Negate),
            OperatorId::Caret => Some(UnaryOp::Complement),
            OperatorId::Bang => Some(UnaryOp::Not),
            _ => None,
        }
    }

    pub fn operator(self) -> OperatorId {
        match self {
            UnaryOp::Identity => OperatorId::Plus,
            UnaryOp::Negate => OperatorId::Minus,
            UnaryOp::Complement => OperatorId::Caret,
            UnaryOp::Not => OperatorId::Bang,
        }
    }

    pub fn as_str(self) -> &'static str {
        operators::as_str(self.operator())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

/// `&expr`
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub pos: Position,
    pub expr: Box<Expr>,
    pub end: Position,
}

spanned_node!(Address, "address operation", |x| format!("Address{{{}}}", x.expr.dump()));

/// `(name)`: the value currently staged for reassignment to `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignerDereference {
    pub pos: Position,
    pub name: String,
    pub end: Position,
}

spanned_node!(AssignerDereference, "assigner dereference", |x| format!(
    "AssignerDereference{{{}}}",
    x.name
));

/// `left op right`
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Box<Expr>,
    pub op: BinaryOp,
    pub right: Box<Expr>,
    pub end: Position,
}

impl Node for Binary {
    fn kind_name(&self) -> &'static str {
        "binary operation"
    }

    fn pos(&self) -> &Position {
        self.left.pos()
    }

    fn end_pos(&self) -> Position {
        self.end.clone()
    }

    fn dump(&self) -> String {
        format!(
            "Binary{{{} BinaryOp{{{}}} {}}}",
            self.left.dump(),
            self.op,
            self.right.dump()
        )
    }
}

/// `true` or `false`
#[derive(Debug, Clone, PartialEq)]
pub struct Boolean {
    pub pos: Position,
    pub value: bool,
    pub end: Position,
}

spanned_node!(Boolean, "boolean literal", |x| format!("Boolean{{{}}}", x.value));

/// `name(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: Selector,
    pub args: Vec<ExprListItem>,
    pub end: Position,
}

impl Node for Call {
    fn kind_name(&self) -> &'static str {
        "function call"
    }

    fn pos(&self) -> &Position {
        &self.name.pos
    }

    fn end_pos(&self) -> Position {
        self.end.clone()
    }

    fn dump(&self) -> String {
        format!("Call{{{} ({})}}", self.name.dump(), dump_values(&self.args))
    }
}

/// Character literal, kept verbatim including quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub pos: Position,
    pub source: String,
    pub end: Position,
}

spanned_node!(Character, "character literal", |x| format!("Character{{{}}}", x.source));

/// `clone expr`
#[derive(Debug, Clone, PartialEq)]
pub struct CloneExpr {
    pub pos: Position,
    pub expr: Box<Expr>,
    pub end: Position,
}

spanned_node!(CloneExpr, "clone operation", |x| format!("Clone{{{}}}", x.expr.dump()));

/// `name[index]`
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub name: Selector,
    pub index: Box<Expr>,
    pub end: Position,
}

impl Node for Index {
    fn kind_name(&self) -> &'static str {
        "index operation"
    }

    fn pos(&self) -> &Position {
        &self.name.pos
    }

    fn end_pos(&self) -> Position {
        self.end.clone()
    }

    fn dump(&self) -> String {
        format!("Index{{{} [{}]}}", self.name.dump(), self.index.dump())
    }
}

/// Integer literal, kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Integer {
    pub pos: Position,
    pub source: String,
    pub end: Position,
}

spanned_node!(Integer, "integer literal", |x| format!("Integer{{{}}}", x.source));

#[derive(Debug, Clone, PartialEq)]
pub struct Nil {
    pub pos: Position,
    pub end: Position,
}

spanned_node!(Nil, "nil literal", |_x| "Nil".to_string());

/// `*expr`
#[derive(Debug, Clone, PartialEq)]
pub struct PointerDereference {
    pub pos: Position,
    pub expr: Box<Expr>,
    pub end: Position,
}

spanned_node!(PointerDereference, "pointer dereference", |x| format!(
    "PointerDereference{{{}}}",
    x.expr.dump()
));

/// Dotted name path, `a.b.c`.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub pos: Position,
    pub names: Vec<String>,
    pub end: Position,
}

spanned_node!(Selector, "selector operation", |x| format!("Selector{{{x}}}"));

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join("."))
    }
}

/// String literal, kept verbatim including quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub pos: Position,
    pub source: String,
    pub end: Position,
}

spanned_node!(StringLiteral, "string literal", |x| format!("String{{{}}}", x.source));

/// `op expr`
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub pos: Position,
    pub op: UnaryOp,
    pub expr: Box<Expr>,
    pub end: Position,
}

spanned_node!(Unary, "unary operation", |x| format!(
    "Unary{{UnaryOp{{{}}} {}}}",
    x.op,
    x.expr.dump()
));

/// `{}`
#[derive(Debug, Clone, PartialEq)]
pub struct Zero {
    pub pos: Position,
    pub end: Position,
}

spanned_node!(Zero, "zero literal", |_x| "Zero".to_string());

// ============================================================================
// STATEMENTS
// ============================================================================

/// Expression used as a statement or list value.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub expr: Expr,
}

impl Node for Expression {
    fn kind_name(&self) -> &'static str {
        "expression"
    }

    fn pos(&self) -> &Position {
        self.expr.pos()
    }

    fn end_pos(&self) -> Position {
        self.expr.end_pos()
    }

    fn dump(&self) -> String {
        format!("Expression{{{}}}", self.expr.dump())
    }
}

/// `objects = subjects`
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub pos: Position,
    pub objects: Vec<AssignTarget>,
    pub subjects: Vec<ExprListItem>,
    pub end: Position,
}

spanned_node!(Assign, "assignment", |x| {
    let objects: Vec<_> = x.objects.iter().map(Node::dump).collect();
    format!("Assign{{{} = {}}}", objects.join(", "), dump_values(&x.subjects))
});

/// `{ body }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub pos: Position,
    pub body: Vec<Stmt>,
    pub end: Position,
}

spanned_node!(Block, "block", |x| dump_block(&x.body));

#[derive(Debug, Clone, PartialEq)]
pub struct Break {
    pub pos: Position,
    pub end: Position,
}

spanned_node!(Break, "break statement", |_x| "Break".to_string());

#[derive(Debug, Clone, PartialEq)]
pub struct Continue {
    pub pos: Position,
    pub end: Position,
}

spanned_node!(Continue, "continue statement", |_x| "Continue".to_string());

/// `for [test] { body }`; no test means an infinite loop.
#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub pos: Position,
    pub test: Option<Expr>,
    pub body_pos: Position,
    pub body: Vec<Stmt>,
    pub end: Position,
}

spanned_node!(For, "for loop", |x| match &x.test {
    Some(test) => format!("For{{{} {}}}", test.dump(), dump_block(&x.body)),
    None => format!("For{{{}}}", dump_block(&x.body)),
});

/// `if test { then } else { else }`
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub pos: Position,
    pub test: Expr,
    pub then_pos: Position,
    pub then_body: Vec<Stmt>,
    pub then_end: Position,
    pub else_body: Vec<Stmt>,
    pub end: Position,
}

spanned_node!(If, "if statement", |x| {
    let mut s = format!("If{{{} {}", x.test.dump(), dump_block(&x.then_body));
    if !x.else_body.is_empty() {
        s.push_str(" else ");
        s.push_str(&dump_block(&x.else_body));
    }
    s.push('}');
    s
});

/// `return values`
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub pos: Position,
    pub values: Vec<ExprListItem>,
    pub end: Position,
}

spanned_node!(Return, "return statement", |x| {
    if x.values.is_empty() {
        "Return{}".to_string()
    } else {
        format!("Return{{ {}}}", dump_values(&x.values))
    }
});

/// `names : Type`; `ty` is `None` for `auto`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub pos: Position,
    pub names: Vec<String>,
    pub ty: Option<TypeSpec>,
    pub end: Position,
}

spanned_node!(VariableDecl, "variable declaration", |x| {
    let ty = x.ty.as_ref().map_or_else(|| "auto".to_string(), Node::dump);
    format!("VariableDecl{{{} : {}}}", x.names.join(", "), ty)
});

/// `names := values`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDef {
    pub pos: Position,
    pub names: Vec<String>,
    pub values: Vec<ExprListItem>,
    pub end: Position,
}

spanned_node!(VariableDef, "variable definition", |x| format!(
    "VariableDef{{{} := {}}}",
    x.names.join(", "),
    dump_values(&x.values)
));

// ============================================================================
// FILE-LEVEL AND LIST MEMBERS
// ============================================================================

/// `// text`, kept verbatim without the line break.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub pos: Position,
    pub source: String,
}

impl Node for Comment {
    fn kind_name(&self) -> &'static str {
        "comment"
    }

    fn pos(&self) -> &Position {
        &self.pos
    }

    fn end_pos(&self) -> Position {
        self.pos.after(&self.source)
    }

    fn dump(&self) -> String {
        format!("Comment{{{}}}", self.source)
    }

    fn as_comment(&self) -> Option<&Comment> {
        Some(self)
    }
}

/// `[pub] name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDef {
    pub pos: Position,
    pub public: bool,
    pub name: String,
    pub value: Expr,
    pub end: Position,
}

spanned_node!(ConstantDef, "constant definition", |x| format!(
    "ConstantDef{{{}{} = {}}}",
    pub_prefix(x.public),
    x.name,
    x.value.dump()
));

/// `[pub] [(receiver Type)] name(params) results { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub pos: Position,
    pub public: bool,
    pub receiver_name: String,
    pub receiver_type: Option<TypeSpec>,
    pub name: String,
    pub params: Vec<ParamListItem>,
    pub params_end: Position,
    pub results: Vec<TypeListItem>,
    pub body_pos: Position,
    pub body: Vec<Stmt>,
    pub end: Position,
}

impl FunctionDef {
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter_map(|node| match node {
            ParamListItem::Parameter(param) => Some(param),
            ParamListItem::Comment(_) => None,
        })
    }

    pub fn result_types(&self) -> impl Iterator<Item = &TypeSpec> {
        self.results.iter().filter_map(|node| match node {
            TypeListItem::TypeSpec(spec) => Some(spec),
            TypeListItem::Comment(_) => None,
        })
    }
}

spanned_node!(FunctionDef, "function definition", |x| {
    let params: Vec<_> = x.parameters().map(Node::dump).collect();
    let results: Vec<_> = x.result_types().map(Node::dump).collect();
    let results = match results.len() {
        0 => String::new(),
        1 => format!("{} ", results[0]),
        _ => format!("({}) ", results.join(", ")),
    };
    format!(
        "FunctionDef{{{}{}({}) {}{}}}",
        pub_prefix(x.public),
        x.name,
        params.join(", "),
        results,
        dump_block(&x.body)
    )
});

/// `name Type [access]`
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub pos: Position,
    pub name: String,
    pub ty: TypeSpec,
    pub access: FieldAccess,
    pub end: Position,
}

spanned_node!(Field, "field", |x| match x.access {
    FieldAccess::Hidden => format!("Field{{{} {}}}", x.name, x.ty.ty),
    access => format!("Field{{{} {} {}}}", x.name, x.ty.ty, access),
});

/// `[import] ["path"] [names]`
///
/// `path` keeps the quoted literal. An import without path lists names whose namespace is
/// resolved by the formatter.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub pos: Position,
    pub path: Option<String>,
    pub names: Vec<IdentListItem>,
    pub end: Position,
}

impl Import {
    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.names.iter().filter_map(|node| match node {
            IdentListItem::Identifier(ident) => Some(ident),
            IdentListItem::Comment(_) => None,
        })
    }

    fn dump_in_list(&self) -> String {
        let mut s = self.path.clone().unwrap_or_default();
        let names: Vec<_> = self.identifiers().map(|ident| ident.name.to_string()).collect();
        if !names.is_empty() {
            if !s.is_empty() {
                s.push(' ');
            }
            s.push_str(&format!("({})", names.join(", ")));
        }
        s
    }
}

spanned_node!(Import, "import", |x| format!("Import{{{}}}", x.dump_in_list()));

/// `import ...` at file level.
#[derive(Debug, Clone, PartialEq)]
pub struct Imports {
    pub pos: Position,
    pub imports: Vec<ImportListItem>,
    pub end: Position,
}

spanned_node!(Imports, "import list", |x| {
    let imports: Vec<_> = x
        .imports
        .iter()
        .filter_map(|node| match node {
            ImportListItem::Import(import) => Some(import.dump_in_list()),
            ImportListItem::Comment(_) => None,
        })
        .collect();
    format!("Imports{{{}}}", imports.join("; "))
});

/// `name Type`
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub pos: Position,
    pub name: String,
    pub ty: TypeSpec,
    pub end: Position,
}

spanned_node!(Parameter, "parameter", |x| format!("Parameter{{{} {}}}", x.name, x.ty.ty));

/// `[pub] Name [access] { fields }`
///
/// A type-level access word is not stored: the parser applies it to every field that has none.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub pos: Position,
    pub public: bool,
    pub name: String,
    pub fields: Vec<FieldListItem>,
    pub end: Position,
}

spanned_node!(TypeDef, "type definition", |x| {
    let fields: Vec<_> = x
        .fields
        .iter()
        .filter_map(|node| match node {
            FieldListItem::Field(field) => Some(field.dump()),
            FieldListItem::Comment(_) | FieldListItem::Import(_) => None,
        })
        .collect();
    format!(
        "TypeDef{{{}{} {{{}}}}}",
        pub_prefix(x.public),
        x.name,
        fields.join("; ")
    )
});

/// Qualified name in an import list.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub pos: Position,
    pub name: QualifiedName,
    pub end: Position,
}

spanned_node!(Identifier, "identifier", |x| format!("Identifier{{{}}}", x.name));

/// Type as written at a position.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub pos: Position,
    pub ty: Type,
    pub end: Position,
}

spanned_node!(TypeSpec, "type specification", |x| x.ty.to_string());

// --- dump helpers ------------------------------------------------------------

fn pub_prefix(public: bool) -> &'static str {
    if public { "pub " } else { "" }
}

fn dump_values(values: &[ExprListItem]) -> String {
    let dumps: Vec<_> = values
        .iter()
        .filter(|node| node.as_comment().is_none())
        .map(Node::dump)
        .collect();
    dumps.join(", ")
}

fn dump_block(body: &[Stmt]) -> String {
    let dumps: Vec<_> = body
        .iter()
        .filter(|node| node.as_comment().is_none())
        .map(Node::dump)
        .collect();
    format!("Block{{{}}}", dumps.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(parts: &[&str]) -> QualifiedName {
        QualifiedName(parts.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_qualified_name_parts() {
        let n = name(&["", "std", "io", "Reader"]);
        assert_eq!(n.to_string(), "::std::io::Reader");
        assert_eq!(n.namespace(), "::std::io");
        assert_eq!(n.short(), "Reader");
        assert_eq!(name(&["x"]).namespace(), "");
    }

    #[test]
    fn test_type_display_flag_order() {
        let ty = Type {
            assigner: true,
            pointer: true,
            reference: true,
            shared: true,
            item: Some(Box::new(Type::named(name(&["int"])))),
            name: QualifiedName::default(),
        };
        assert_eq!(ty.to_string(), "=*&#[int]");
    }

    #[test]
    fn test_type_equality_is_structural() {
        let a = Type {
            pointer: true,
            item: Some(Box::new(Type::named(name(&["a", "b"])))),
            ..Type::default()
        };
        let mut b = a.clone();
        assert_eq!(a, b);
        b.item = Some(Box::new(Type {
            shared: true,
            ..Type::named(name(&["a", "b"]))
        }));
        assert_ne!(a, b);
    }

    #[test]
    fn test_unspecified_type() {
        assert!(!Type::default().is_specified());
        assert!(Type::named(name(&["int"])).is_specified());
    }

    #[test]
    fn test_operator_mapping_round_trips() {
        for info in operators::OPERATORS {
            if let Some(op) = BinaryOp::from_operator(info.id) {
                assert_eq!(op.operator(), info.id);
                assert_eq!(Some(op.precedence()), info.precedence);
            }
            if let Some(op) = UnaryOp::from_operator(info.id) {
                assert_eq!(op.operator(), info.id);
                assert!(info.prefix);
            }
        }
    }

    #[test]
    fn test_comment_end_is_on_same_line() {
        let comment = Comment {
            pos: Position::location("a.dp"),
            source: "// hi".to_string(),
        };
        assert_eq!(comment.end_pos().column, 6);
        assert!(Stmt::Comment(comment).as_comment().is_some());
    }
}
