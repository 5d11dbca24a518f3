mod clause_store;
mod propagation_statistics;
mod unit_propagator;
mod watch_lists;

pub use clause_store::ClauseStore;
pub use propagation_statistics::PropagationStatistics;
pub use unit_propagator::UnitPropagator;
pub(crate) use watch_lists::WatchLists;
pub(crate) use watch_lists::WatchStatus;
