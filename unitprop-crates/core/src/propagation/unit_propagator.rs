use std::collections::VecDeque;
use std::fmt::Display;
use std::sync::Arc;

use log::debug;
use log::trace;

use super::ClauseStore;
use super::PropagationStatistics;
use super::WatchLists;
use super::WatchStatus;
use crate::basic_types::ClauseId;
use crate::basic_types::Inconsistent;
use crate::basic_types::Literal;
use crate::containers::HashSet;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::unitprop_assert_extreme;
use crate::unitprop_assert_simple;

/// Maintains the units of a CNF formula: the literals which are forced to be true by the clauses
/// together with the units asserted so far.
///
/// Propagation uses two watched literals per clause. A clause only needs to be examined when one
/// of its watched literals becomes false, at which point either another non-false literal takes
/// over the watch, the clause turns out to be satisfied, or the remaining watched literal is
/// forced.
///
/// Units are never retracted. To explore an assignment which may have to be undone, clone the
/// propagator first and assert the units on the clone; the clone shares the (immutable) clauses
/// but nothing else.
///
/// # Example
/// ```rust
/// # use unitprop_core::Inconsistent;
/// # use unitprop_core::Literal;
/// # use unitprop_core::UnitPropagator;
/// let clauses = [[1, 2]].map(|clause| clause.map(Literal::from_dimacs));
/// let propagator = UnitPropagator::new(clauses)?;
///
/// let mut branch = propagator.clone();
/// let derived = branch.add_unit(Literal::from_dimacs(-1))?;
///
/// assert!(derived.contains(&Literal::from_dimacs(2)));
/// assert!(branch.is_true(Literal::from_dimacs(2)));
/// assert!(propagator.units().is_empty());
/// # Ok::<(), Inconsistent>(())
/// ```
#[derive(Clone, Debug)]
pub struct UnitPropagator {
    clauses: Arc<ClauseStore>,
    watch_lists: WatchLists,
    units: HashSet<Literal>,
    /// The units whose consequences have not been propagated yet
    unit_queue: VecDeque<Literal>,
    statistics: PropagationStatistics,
    is_inconsistent: bool,
}

impl UnitPropagator {
    /// Creates a propagator for the given clauses and propagates the unit clauses among them.
    ///
    /// Fails if a clause is empty or if the unit clauses propagate to an inconsistency.
    pub fn new<Clauses, Literals>(clauses: Clauses) -> Result<UnitPropagator, Inconsistent>
    where
        Clauses: IntoIterator<Item = Literals>,
        Literals: IntoIterator<Item = Literal>,
    {
        let clauses = ClauseStore::new(clauses).inspect_err(|inconsistent| {
            debug!("Formula is inconsistent: {inconsistent}");
        })?;

        UnitPropagator::with_clause_store(Arc::new(clauses))
    }

    /// Creates a propagator for the clauses in an existing store, which is shared with the
    /// returned propagator.
    pub fn with_clause_store(clauses: Arc<ClauseStore>) -> Result<UnitPropagator, Inconsistent> {
        let mut propagator = UnitPropagator {
            watch_lists: WatchLists::new(&clauses),
            clauses,
            units: HashSet::default(),
            unit_queue: VecDeque::new(),
            statistics: PropagationStatistics::default(),
            is_inconsistent: false,
        };

        let clauses = Arc::clone(&propagator.clauses);
        let unit_clauses = clauses
            .iter()
            .filter(|(_, clause)| clause.is_unit())
            .map(|(_, clause)| clause[0]);

        let initial_units = propagator.assert_and_propagate(unit_clauses)?;

        debug!(
            "Created unit propagator for {} clauses with {} initial units",
            propagator.clauses.len(),
            initial_units.len()
        );

        Ok(propagator)
    }

    /// Asserts `literal` as a unit and propagates it.
    ///
    /// See [`UnitPropagator::add_units`].
    pub fn add_unit(&mut self, literal: Literal) -> Result<HashSet<Literal>, Inconsistent> {
        self.add_units(std::iter::once(literal))
    }

    /// Asserts every literal in `literals` as a unit and propagates them to a fixed point.
    ///
    /// Returns the literals which became units during this call, including the asserted
    /// literals which were not units before. Literals which are already units are ignored.
    ///
    /// On an [`Inconsistent`] result the propagator is left in an inconsistent state and every
    /// following call fails with [`Inconsistent::InconsistentState`]; clone the propagator
    /// beforehand if the current state needs to be recovered.
    pub fn add_units(
        &mut self,
        literals: impl IntoIterator<Item = Literal>,
    ) -> Result<HashSet<Literal>, Inconsistent> {
        if self.is_inconsistent {
            return Err(Inconsistent::InconsistentState);
        }

        unitprop_assert_simple!(
            self.unit_queue.is_empty(),
            "units can only be added once all previous units are propagated"
        );

        let derived = self.assert_and_propagate(literals)?;

        trace!("Derived {} new units", derived.len());

        Ok(derived)
    }

    /// The literals which are known to be true.
    pub fn units(&self) -> &HashSet<Literal> {
        &self.units
    }

    pub fn is_true(&self, literal: Literal) -> bool {
        self.units.contains(&literal)
    }

    pub fn is_false(&self, literal: Literal) -> bool {
        self.units.contains(&!literal)
    }

    pub fn is_assigned(&self, literal: Literal) -> bool {
        self.is_true(literal) || self.is_false(literal)
    }

    /// Whether an inconsistency was found by this propagator.
    pub fn is_inconsistent(&self) -> bool {
        self.is_inconsistent
    }

    pub fn clauses(&self) -> &Arc<ClauseStore> {
        &self.clauses
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn statistics(&self) -> &PropagationStatistics {
        &self.statistics
    }

    /// Logs the statistics of this propagator, with every statistic name starting with
    /// `name_prefix`.
    pub fn log_statistics(&self, name_prefix: impl Display) {
        self.statistics.log(StatisticLogger::new([name_prefix]));
    }

    /// Enqueues `literals` and propagates the queue, marking the propagator as inconsistent if
    /// this fails.
    fn assert_and_propagate(
        &mut self,
        literals: impl IntoIterator<Item = Literal>,
    ) -> Result<HashSet<Literal>, Inconsistent> {
        let mut derived = HashSet::default();

        let result = literals
            .into_iter()
            .try_for_each(|literal| self.enqueue(literal, &mut derived))
            .and_then(|_| self.propagate(&mut derived));

        if let Err(inconsistent) = result {
            debug!("Propagation found an inconsistency: {inconsistent}");
            self.statistics.num_inconsistencies += 1;
            self.is_inconsistent = true;
            return Err(inconsistent);
        }

        Ok(derived)
    }

    /// Makes `literal` a unit and adds it to the queue, unless it is already a unit.
    fn enqueue(
        &mut self,
        literal: Literal,
        derived: &mut HashSet<Literal>,
    ) -> Result<(), Inconsistent> {
        if self.is_true(literal) {
            return Ok(());
        }

        if self.is_false(literal) {
            return Err(Inconsistent::ComplementaryUnit { literal });
        }

        let _ = self.units.insert(literal);
        let _ = derived.insert(literal);
        self.unit_queue.push_back(literal);
        self.statistics.num_enqueued_units += 1;

        Ok(())
    }

    /// Processes the queue until it is empty, adding every new unit to `derived`.
    fn propagate(&mut self, derived: &mut HashSet<Literal>) -> Result<(), Inconsistent> {
        while let Some(true_literal) = self.unit_queue.pop_front() {
            trace!("Propagating {true_literal}");
            self.statistics.num_processed_units += 1;

            // Every clause watching the negation of the unit has lost a watched literal. All of
            // them are either watched by a new literal, retired, or force their other watch.
            let false_literal = !true_literal;
            for clause_id in self.watch_lists.take_watchers(false_literal) {
                self.statistics.num_watch_visits += 1;
                self.propagate_clause(clause_id, false_literal, derived)?;
            }
        }

        unitprop_assert_extreme!(self.debug_check_state());

        Ok(())
    }

    fn propagate_clause(
        &mut self,
        clause_id: ClauseId,
        false_literal: Literal,
        derived: &mut HashSet<Literal>,
    ) -> Result<(), Inconsistent> {
        let remaining_literal = self
            .watch_lists
            .other_watched_literal(clause_id, false_literal);

        if self.is_true(remaining_literal) {
            self.retire(clause_id);
            return Ok(());
        }

        // first literal which is not false, in clause order
        let replacement = self.clauses[clause_id]
            .iter()
            .filter(|&literal| literal != remaining_literal)
            .find(|&literal| !self.units.contains(&!literal));

        match replacement {
            Some(literal) if self.is_true(literal) => self.retire(clause_id),
            Some(literal) => {
                self.statistics.num_watch_replacements += 1;
                self.watch_lists
                    .watch(clause_id, [remaining_literal, literal]);
            }
            None => {
                if self.is_false(remaining_literal) {
                    return Err(Inconsistent::FalsifiedClause {
                        clause_id,
                        literal: remaining_literal,
                    });
                }

                trace!("Clause {clause_id} forces {remaining_literal}");
                self.retire(clause_id);
                self.enqueue(remaining_literal, derived)?;
            }
        }

        Ok(())
    }

    fn retire(&mut self, clause_id: ClauseId) {
        self.statistics.num_retired_clauses += 1;
        self.watch_lists.retire(clause_id);
    }
}

// methods for debugging
impl UnitPropagator {
    /// Checks the internal invariants of the propagator, panicking with a description of the
    /// violated invariant if one does not hold.
    ///
    /// Only meaningful for a propagator which is not inconsistent.
    pub fn debug_check_state(&self) -> bool {
        assert!(
            self.units.iter().all(|&literal| !self.is_false(literal)),
            "A variable is assigned both polarities."
        );
        assert!(self.watch_lists.debug_check_state(&self.clauses));

        if !self.unit_queue.is_empty() {
            return true;
        }

        for (clause_id, clause) in self.clauses.iter() {
            match self.watch_lists.status(clause_id) {
                WatchStatus::Watched(watched) => assert!(
                    watched.iter().all(|&literal| !self.is_false(literal)),
                    "Clause {clause_id} watches a false literal after propagation completed."
                ),
                WatchStatus::Unit | WatchStatus::Retired => assert!(
                    clause.iter().any(|literal| self.is_true(literal)),
                    "Clause {clause_id} is not watched but also not satisfied."
                ),
            }
        }

        true
    }
}
