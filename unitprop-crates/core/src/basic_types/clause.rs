use std::fmt::Display;
use std::ops::Index;

use itertools::Itertools;

use super::Literal;
use crate::containers::StorageKey;

/// Identifies a clause by its position in the formula the propagator was created from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClauseId {
    index: u32,
}

impl StorageKey for ClauseId {
    fn index(&self) -> usize {
        self.index as usize
    }

    fn create_from_index(index: usize) -> Self {
        ClauseId {
            index: u32::try_from(index).expect("the number of clauses is limited to u32::MAX"),
        }
    }
}

impl Display for ClauseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index)
    }
}

/// A non-empty disjunction of [`Literal`]s over distinct variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    literals: Box<[Literal]>,
}

impl Clause {
    pub(crate) fn new(literals: Vec<Literal>) -> Clause {
        Clause {
            literals: literals.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn contains(&self, literal: Literal) -> bool {
        self.literals.contains(&literal)
    }

    pub fn get_literal_slice(&self) -> &[Literal] {
        &self.literals
    }

    pub fn iter(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Literal {
        &self.literals[index]
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.literals.iter().join(" "))
    }
}
