use thiserror::Error;

use super::ClauseId;
use super::Literal;
#[cfg(doc)]
use crate::UnitPropagator;

/// Signals that the clauses of a [`UnitPropagator`] cannot be satisfied together with the units
/// which are known to it.
///
/// The variants all describe the same situation; they only differ in how the inconsistency was
/// discovered.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Inconsistent {
    /// The formula contains a clause without any literals.
    #[error("clause {clause_id} is empty")]
    EmptyClause { clause_id: ClauseId },
    /// A literal was asserted or derived while its negation is already a unit.
    #[error("tried to add {literal} as a unit but its negation is already a unit")]
    ComplementaryUnit { literal: Literal },
    /// Every literal of a clause is false; `literal` is the last literal which was not yet
    /// falsified when propagating the clause.
    #[error("clause {clause_id} can no longer be satisfied, its last remaining literal {literal} is false")]
    FalsifiedClause {
        clause_id: ClauseId,
        literal: Literal,
    },
    /// A unit was added to a propagator which was already found to be inconsistent.
    #[error("the propagator was already found to be inconsistent")]
    InconsistentState,
}
