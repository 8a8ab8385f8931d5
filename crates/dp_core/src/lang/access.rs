//! Access-control vocabulary.
//!
//! dp has no reserved access keywords. Visibility is expressed with contextual words that lex as
//! plain identifiers: [`PUB`] in front of a definition, and one of the [`FieldAccess`] words after
//! a field or type name.
//!
//! ## Examples
//! ```rust
//! use dp_core::lang::access::FieldAccess;
//!
//! assert_eq!(FieldAccess::from_word("mutable"), Some(FieldAccess::Mutable));
//! assert_eq!(FieldAccess::from_word("hidden"), None);
//! assert_eq!(FieldAccess::Hidden.as_str(), "hidden");
//! ```

/// Word marking a definition as public.
pub const PUB: &str = "pub";

/// Access level of a type field.
///
/// `Hidden` is the implicit default and has no source spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldAccess {
    #[default]
    Hidden,
    Visible,
    Mutable,
    Assignable,
}

impl FieldAccess {
    /// Every access level that may be spelled in source.
    pub const SPELLED: [FieldAccess; 3] = [FieldAccess::Visible, FieldAccess::Mutable, FieldAccess::Assignable];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldAccess::Hidden => "hidden",
            FieldAccess::Visible => "visible",
            FieldAccess::Mutable => "mutable",
            FieldAccess::Assignable => "assignable",
        }
    }

    /// Resolve an access word written after a field or type name.
    pub fn from_word(word: &str) -> Option<Self> {
        Self::SPELLED.into_iter().find(|access| access.as_str() == word)
    }
}

impl std::fmt::Display for FieldAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
