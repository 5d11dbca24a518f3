use std::fmt::Display;
use std::num::NonZeroI32;
use std::num::NonZeroU32;
use std::ops::Not;

/// A propositional variable, identified by a positive (1-based) index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable {
    index: NonZeroU32,
}

impl Variable {
    pub fn new(index: NonZeroU32) -> Variable {
        Variable { index }
    }

    pub fn index(&self) -> u32 {
        self.index.get()
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index)
    }
}

/// A [`Variable`] with a polarity, stored in the DIMACS encoding: the magnitude of the code is
/// the index of the variable and its sign is the polarity of the literal.
///
/// The negation of a literal is obtained with `!literal`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    code: NonZeroI32,
}

impl Literal {
    /// Creates the literal with the given non-zero DIMACS code.
    ///
    /// # Panics
    /// If `code` is [`i32::MIN`], which has no negation in the range of `i32`.
    pub fn new(code: NonZeroI32) -> Literal {
        assert!(code.get() != i32::MIN, "i32::MIN does not encode a literal");
        Literal { code }
    }

    /// Creates the literal with the given DIMACS code.
    ///
    /// # Panics
    /// If `code` is 0 or [`i32::MIN`], neither of which encodes a literal.
    pub fn from_dimacs(code: i32) -> Literal {
        Literal::new(NonZeroI32::new(code).expect("0 does not encode a literal"))
    }

    pub fn from_variable(variable: Variable, is_positive: bool) -> Literal {
        let code = NonZeroI32::try_from(variable.index)
            .expect("variable indices are limited to the range of i32");
        Literal {
            code: if is_positive { code } else { -code },
        }
    }

    pub fn variable(&self) -> Variable {
        Variable::new(self.code.unsigned_abs())
    }

    pub fn is_positive(&self) -> bool {
        self.code.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.code.is_negative()
    }

    pub fn to_dimacs(self) -> i32 {
        self.code.get()
    }
}

impl From<NonZeroI32> for Literal {
    fn from(code: NonZeroI32) -> Self {
        Literal::new(code)
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal { code: -self.code }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}
