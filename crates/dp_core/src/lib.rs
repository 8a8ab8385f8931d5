//! Provide the canonical language vocabulary shared by the dp lexer, parser and formatter.
//!
//! This crate is intentionally small and dependency-free. It holds spellings and metadata for
//! reserved words, operators, punctuation and access modes so that the syntax crate and the
//! formatter never compare raw strings against ad-hoc literals.
//!
//! ## Notes
//!
//! - This is a vocabulary crate: **no IO**, no global state, and no AST types.

pub mod lang;
