//! Syntax front end for the dp language: positions, diagnostics, lexer, AST and parser.
//!
//! This crate is reused by the formatter and the `dpfmt` command-line tool. It recognizes syntax
//! only: it does not resolve names or check types.
//!
//! ## Notes
//! - Every stage is a pure function over its input. Lexing and parsing abort on the first failure
//!   and return a [`diagnostics::SourceError`]; there is no partial output.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `dp_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use dp_syntax::{lexer, parser, source::Position};
//!
//! let tokens = lexer::tokenize(Position::location("main.dp"), "x = 1\n").unwrap();
//! let file = parser::parse(&tokens).unwrap();
//! assert_eq!(file.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod token_helpers;
