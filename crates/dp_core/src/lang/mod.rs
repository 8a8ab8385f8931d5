//! dp language vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved keywords, operators,
//! punctuation, and the contextual access words.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up spellings and
//! metadata via registry tables.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.
//! - The lexer builds its symbol rules from [`operators::OPERATORS`] and
//!   [`punctuation::PUNCTUATION`]; the parser and formatter take precedence tiers from
//!   [`operators`].
//!
//! ## Examples
//! ```rust
//! use dp_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("if"), Some(KeywordId::If));
//! assert_eq!(keywords::as_str(KeywordId::If), "if");
//! ```

pub mod access;
pub mod keywords;
pub mod operators;
pub mod punctuation;
