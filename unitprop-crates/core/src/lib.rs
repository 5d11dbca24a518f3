//! # Unitprop
//! Incremental unit propagation over formulas in conjunctive normal form.
//!
//! A [`UnitPropagator`] is created from a set of clauses and keeps track of the literals which are
//! *units*: literals which have to be true because they were asserted through
//! [`UnitPropagator::add_units`] or because a clause has no other way of being satisfied. Every
//! clause is watched by two of its literals, so asserting a unit only touches the clauses which
//! watch its negation.
//!
//! A propagator is cheap to clone; the clauses are shared between clones while the units are
//! not. This makes it possible to explore the consequences of a tentative assignment on a clone
//! while the original remains available.
//!
//! ```rust
//! # use unitprop_core::Inconsistent;
//! # use unitprop_core::Literal;
//! # use unitprop_core::UnitPropagator;
//! // The formula (¬x2 ∨ x3 ∨ ¬x1)
//! let clauses = [[-2, 3, -1]].map(|clause| clause.map(Literal::from_dimacs));
//! let mut propagator = UnitPropagator::new(clauses)?;
//!
//! let _ = propagator.add_unit(Literal::from_dimacs(-3))?;
//! let derived = propagator.add_unit(Literal::from_dimacs(1))?;
//! assert!(derived.contains(&Literal::from_dimacs(-2)));
//!
//! // Asserting x2 now leaves no literal of the clause which can be true
//! let result = propagator.add_unit(Literal::from_dimacs(2));
//! assert!(matches!(result, Err(Inconsistent::ComplementaryUnit { .. })));
//! # Ok::<(), Inconsistent>(())
//! ```
pub mod asserts;
pub(crate) mod basic_types;
pub mod containers;
mod propagation;
pub mod statistics;

pub use crate::basic_types::Clause;
pub use crate::basic_types::ClauseId;
pub use crate::basic_types::Inconsistent;
pub use crate::basic_types::Literal;
pub use crate::basic_types::Variable;
pub use crate::propagation::ClauseStore;
pub use crate::propagation::PropagationStatistics;
pub use crate::propagation::UnitPropagator;
