#![forbid(unsafe_code)]
//! dp source formatter
//!
//! This crate provides the canonical formatter for the dp language and the `dpfmt` command-line
//! tool. The syntax front end (positions, diagnostics, lexer, AST and parser) lives in
//! `dp_syntax`; the shared vocabulary lives in `dp_core`.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: The formatter accepts every tree the parser produces; a node it cannot
//!   render is a bug in this crate, not a user error.

pub mod cli;
pub mod format;

pub use dp_syntax::ast;
pub use dp_syntax::diagnostics;
pub use dp_syntax::lexer;
pub use dp_syntax::parser;
pub use dp_syntax::source;

pub use format::{check_formatted, format, format_diff, format_source, format_source_bytes};
