// Acknowledgement:
// Based on rust-analyzer's `TokenSet`.
// https://github.com/rust-lang/rust-analyzer/blob/master/crates/parser/src/token_set.rs

use std::fmt::{self, Debug, Formatter};

use crate::SyntaxKind;

/// The number of words in a set.
const WORDS: usize = SyntaxKind::COUNT.div_ceil(128);

/// A set of syntax kinds.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SyntaxSet([u128; WORDS]);

impl SyntaxSet {
    /// Create a new, empty set.
    pub const fn new() -> Self {
        Self([0; WORDS])
    }

    /// Insert a syntax kind into the set.
    pub const fn add(self, kind: SyntaxKind) -> Self {
        let (word, bit) = slot(kind);
        let mut words = self.0;
        words[word] |= bit;
        Self(words)
    }

    /// Combine two syntax sets.
    pub const fn union(self, other: Self) -> Self {
        let mut words = self.0;
        let mut i = 0;
        while i < WORDS {
            words[i] |= other.0[i];
            i += 1;
        }
        Self(words)
    }

    /// Whether the set contains the given syntax kind.
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let (word, bit) = slot(kind);
        self.0[word] & bit != 0
    }

    /// Whether the set contains no kinds.
    pub const fn is_empty(&self) -> bool {
        let mut i = 0;
        while i < WORDS {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Whether both sets share at least one kind.
    pub const fn intersects(&self, other: Self) -> bool {
        let mut i = 0;
        while i < WORDS {
            if self.0[i] & other.0[i] != 0 {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Iterate over the kinds in the set, in discriminant order.
    pub fn iter(self) -> impl Iterator<Item = SyntaxKind> {
        SyntaxKind::ALL.iter().copied().filter(move |&kind| self.contains(kind))
    }
}

impl Debug for SyntaxSet {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

const fn slot(kind: SyntaxKind) -> (usize, u128) {
    let index = kind as usize;
    (index / 128, 1 << (index % 128))
}

/// Generate an inline const syntax set of the given kinds.
///
/// Example: `if syntax_set!(Plus, Minus).contains(SyntaxKind::Plus) { }`
macro_rules! syntax_set {
    ( $($kind:ident),* $(,)? ) => {
        {
            const SET: crate::set::SyntaxSet = crate::set::SyntaxSet::new()
                $(.add(crate::SyntaxKind:: $kind))*;
            SET
        }
    }
}

pub(crate) use syntax_set;

/// Just build a syntax set of the given kinds. Only used in this file.
macro_rules! make_set {
    ( $($kind:ident),* $(,)? ) => {
        SyntaxSet::new()
        $(.add(SyntaxKind::$kind))*
    }
}

/// Keywords naming built-in simple types.
pub const BUILTIN_TYPE: SyntaxSet = make_set!(
    IntKw, FloatKw, StringKw, BooleanKw, DecimalKw, XmlKw, JsonKw, HandleKw, AnyKw,
    AnydataKw, NeverKw, ByteKw, ReadonlyKw,
);

/// Keywords naming parameterized types other than `map` and `error`.
pub const PARAMETERIZED_TYPE: SyntaxSet = make_set!(FutureKw, TypedescKw, StreamKw);

/// Qualifiers that can precede `object`.
pub const OBJECT_QUAL: SyntaxSet = make_set!(AbstractKw, ClientKw, ReadonlyKw);

/// Qualifiers that can precede a method's `function` keyword.
pub const METHOD_QUAL: SyntaxSet = make_set!(RemoteKw, ResourceKw, TransactionalKw);

/// Visibility qualifiers of object members.
pub const VISIBILITY: SyntaxSet = make_set!(PublicKw, PrivateKw);

/// Literal tokens.
pub const LITERAL: SyntaxSet =
    make_set!(String, Int, HexInt, Float, HexFloat, TrueKw, FalseKw, NullKw);

/// Prefix operators.
pub const UNARY_OP: SyntaxSet = make_set!(Plus, Minus, Exclamation, Negation);

/// Operators that can precede `=` in a compound assignment.
pub const COMPOUND_OP: SyntaxSet = make_set!(
    Plus, Minus, Asterisk, Slash, BitAnd, Pipe, BitXor, DoubleLt, DoubleGt, TripleGt,
);

/// Tokens that can continue an expression as a binary operator. Shift
/// operators are composed from `<<` and adjacent `>` tokens.
pub const BINARY_OP: SyntaxSet = make_set!(
    Plus, Minus, Asterisk, Slash, Percent, Lt, LtEq, Gt, GtEq, EqEq, NotEq, EqEqEq,
    NotEqEq, BitAnd, BitXor, Pipe, LogicalAnd, LogicalOr, Elvis, DoubleLt, Ellipsis,
    DoubleDotLt,
);

/// Tokens that open a member access.
pub const MEMBER_ACCESS: SyntaxSet = make_set!(Dot, OptionalChaining, AnnotChaining);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set() {
        let set = SyntaxSet::new().add(SyntaxKind::LogicalAnd).add(SyntaxKind::LogicalOr);
        assert!(set.contains(SyntaxKind::LogicalAnd));
        assert!(set.contains(SyntaxKind::LogicalOr));
        assert!(!set.contains(SyntaxKind::Exclamation));
    }

    #[test]
    fn test_set_spans_both_words() {
        let set = syntax_set!(IntKw, ErrorCtor);
        assert!(set.contains(SyntaxKind::IntKw));
        assert!(set.contains(SyntaxKind::ErrorCtor));
        assert!(!set.contains(SyntaxKind::NewExpr));
        assert_eq!(set.iter().collect::<Vec<_>>(), [SyntaxKind::IntKw, SyntaxKind::ErrorCtor]);
    }
}
