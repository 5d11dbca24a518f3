use crate::create_statistics_struct;
#[cfg(doc)]
use crate::UnitPropagator;

create_statistics_struct!(
    /// Statistics of a [`UnitPropagator`]; a clone starts from the statistics of the propagator
    /// it was cloned from.
    PropagationStatistics {
        /// The number of units whose consequences have been propagated
        num_processed_units: u64,
        /// The number of units which were added to the queue, including asserted units
        num_enqueued_units: u64,
        /// The number of times a clause was examined because one of its watched literals became
        /// false
        num_watch_visits: u64,
        /// The number of times a watched literal was replaced by another literal of its clause
        num_watch_replacements: u64,
        /// The number of clauses which are satisfied and no longer watched
        num_retired_clauses: u64,
        /// The number of times an inconsistency was detected
        num_inconsistencies: u64,
});
