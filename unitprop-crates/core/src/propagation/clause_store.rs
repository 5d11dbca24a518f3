use std::ops::Index;

use itertools::Itertools;

use crate::basic_types::Clause;
use crate::basic_types::ClauseId;
use crate::basic_types::Inconsistent;
use crate::basic_types::Literal;
use crate::containers::KeyedVec;
use crate::unitprop_assert_moderate;

/// The clauses of a formula, fixed once the store is created.
///
/// A store is never modified after creation, which allows a propagator and all of its clones to
/// share it.
#[derive(Debug, Default)]
pub struct ClauseStore {
    clauses: KeyedVec<ClauseId, Clause>,
}

impl ClauseStore {
    /// Stores the given clauses; the [`ClauseId`] of a clause is its position in `clauses`.
    ///
    /// Returns [`Inconsistent::EmptyClause`] if one of the clauses has no literals.
    pub fn new<Clauses, Literals>(clauses: Clauses) -> Result<ClauseStore, Inconsistent>
    where
        Clauses: IntoIterator<Item = Literals>,
        Literals: IntoIterator<Item = Literal>,
    {
        let clauses = clauses.into_iter();
        let mut store: KeyedVec<ClauseId, Clause> =
            KeyedVec::with_capacity(clauses.size_hint().0);

        for literals in clauses {
            let literals = literals.into_iter().collect::<Vec<_>>();
            if literals.is_empty() {
                return Err(Inconsistent::EmptyClause {
                    clause_id: store.next_key(),
                });
            }

            unitprop_assert_moderate!(
                literals.iter().map(Literal::variable).all_unique(),
                "a variable occurs more than once in a clause"
            );
            let _ = store.push(Clause::new(literals));
        }

        Ok(ClauseStore { clauses: store })
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClauseId, &Clause)> {
        self.clauses.keys().zip(self.clauses.iter())
    }
}

impl Index<ClauseId> for ClauseStore {
    type Output = Clause;

    fn index(&self, clause_id: ClauseId) -> &Clause {
        &self.clauses[clause_id]
    }
}
