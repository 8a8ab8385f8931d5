//! Operator vocabulary.
//!
//! This module defines the canonical operator set along with the metadata the parser and
//! formatter share: binary precedence tier and whether the symbol also works as a unary prefix.
//!
//! ## Notes
//! - Binary operators fall into five tiers, [`MIN_BINARY_PRECEDENCE`] (`||`) through
//!   [`MAX_BINARY_PRECEDENCE`] (`* / % << >> & &^`).
//! - [`ULTIMATE_PRECEDENCE`] is synthetic: it is the context precedence of operands bound by a
//!   prefix operator, so any binary operand there needs parentheses.
//! - `*` and `&` also appear as pointer-dereference and address-of prefixes. Those are separate
//!   syntax, so `prefix` is `false` for them here.
//!
//! ## Examples
//! ```rust
//! use dp_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("&^"), Some(OperatorId::AmpCaret));
//! assert_eq!(operators::binary_precedence(OperatorId::Plus), Some(4));
//! assert_eq!(operators::binary_precedence(OperatorId::Bang), None);
//! ```

/// Precedence of `||`.
pub const MIN_BINARY_PRECEDENCE: u8 = 1;
/// Precedence of the multiplicative tier.
pub const MAX_BINARY_PRECEDENCE: u8 = 5;
/// Context precedence for operands of prefix operators.
pub const ULTIMATE_PRECEDENCE: u8 = MAX_BINARY_PRECEDENCE + 1;

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorId {
    // Arithmetic / bitwise
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    AmpCaret,
    Pipe,
    Caret,
    LtLt,
    GtGt,

    // Logical
    AndAnd,
    OrOr,
    Bang,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub canonical: &'static str,
    /// Binary precedence tier, `None` for prefix-only operators.
    pub precedence: Option<u8>,
    /// Usable as a unary prefix operator.
    pub prefix: bool,
}

/// Registry of every operator.
pub const OPERATORS: &[OperatorInfo] = &[
    op(OperatorId::Plus, "+", Some(4), true),
    op(OperatorId::Minus, "-", Some(4), true),
    op(OperatorId::Star, "*", Some(5), false),
    op(OperatorId::Slash, "/", Some(5), false),
    op(OperatorId::Percent, "%", Some(5), false),
    op(OperatorId::AndAnd, "&&", Some(2), false),
    op(OperatorId::OrOr, "||", Some(1), false),
    op(OperatorId::AmpCaret, "&^", Some(5), false),
    op(OperatorId::Amp, "&", Some(5), false),
    op(OperatorId::Pipe, "|", Some(4), false),
    op(OperatorId::Caret, "^", Some(4), true),
    op(OperatorId::LtLt, "<<", Some(5), false),
    op(OperatorId::GtGt, ">>", Some(5), false),
    op(OperatorId::EqEq, "==", Some(3), false),
    op(OperatorId::NotEq, "!=", Some(3), false),
    op(OperatorId::LtEq, "<=", Some(3), false),
    op(OperatorId::GtEq, ">=", Some(3), false),
    op(OperatorId::Lt, "<", Some(3), false),
    op(OperatorId::Gt, ">", Some(3), false),
    op(OperatorId::Bang, "!", None, true),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Canonical spelling.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).canonical
}

/// Binary precedence tier of `id`, if it is a binary operator.
pub fn binary_precedence(id: OperatorId) -> Option<u8> {
    info_for(id).precedence
}

/// Whether `id` can start a unary expression.
pub fn is_prefix(id: OperatorId) -> bool {
    info_for(id).prefix
}

/// Resolve an operator spelling to its identifier.
///
/// ## Notes
/// - Matching is exact; `"&&"` never resolves to `&`.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.canonical == spelling).map(|o| o.id)
}

// --- helpers -----------------------------------------------------------------

const fn op(id: OperatorId, canonical: &'static str, precedence: Option<u8>, prefix: bool) -> OperatorInfo {
    OperatorInfo {
        id,
        canonical,
        precedence,
        prefix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplicative_tier() {
        for spelling in ["*", "/", "%", "<<", ">>", "&", "&^"] {
            let id = from_str(spelling).unwrap();
            assert_eq!(binary_precedence(id), Some(MAX_BINARY_PRECEDENCE), "{spelling}");
        }
    }

    #[test]
    fn test_lowest_tier_is_logical_or() {
        assert_eq!(binary_precedence(OperatorId::OrOr), Some(MIN_BINARY_PRECEDENCE));
        assert_eq!(binary_precedence(OperatorId::AndAnd), Some(2));
    }

    #[test]
    fn test_prefix_operators() {
        let prefixes: Vec<_> = OPERATORS.iter().filter(|o| o.prefix).map(|o| o.canonical).collect();
        assert_eq!(prefixes, vec!["+", "-", "^", "!"]);
    }

    #[test]
    fn test_ultimate_precedence_exceeds_every_tier() {
        for info in OPERATORS {
            if let Some(p) = info.precedence {
                assert!(p < ULTIMATE_PRECEDENCE);
            }
        }
    }
}
