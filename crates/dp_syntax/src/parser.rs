//! Parser for the dp programming language.
//!
//! Converts a token stream into a sequence of file-level AST nodes.
//!
//! ## Notes
//! - Every grammar rule is a method over a cheap cursor ([`Parser`]). A choice point tries an
//!   ordered list of rules on copies of the cursor and commits the first that succeeds, so a
//!   failed attempt never leaves a trace.
//! - When every alternative fails the error is "syntax error" with the individual failures as
//!   sub-errors. A single alternative's failure is returned as is.
//! - Space tokens are invisible to the grammar. Newlines, comments and semicolons are real
//!   grammar symbols.
//!
//! ## Examples
//!
//! ```rust
//! use dp_syntax::ast::Node;
//! use dp_syntax::{lexer, parser, source::Position};
//!
//! let tokens = lexer::tokenize(Position::location("main.dp"), "f(a, b int) {}\n").unwrap();
//! let file = parser::parse(&tokens).unwrap();
//! assert_eq!(
//!     file[0].dump(),
//!     "FunctionDef{f(Parameter{a int}, Parameter{b int}) Block{}}"
//! );
//! ```

use crate::ast::*;
use crate::diagnostics::SourceError;
use crate::lexer::{Token, TokenKind};
use crate::source::Position;
use dp_core::lang::access::{self, FieldAccess};
use dp_core::lang::keywords::KeywordId;
use dp_core::lang::operators::{MAX_BINARY_PRECEDENCE, OperatorId};
use dp_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/combinators.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
