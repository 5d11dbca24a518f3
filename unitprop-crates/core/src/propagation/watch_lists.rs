use super::ClauseStore;
use crate::basic_types::ClauseId;
use crate::basic_types::Literal;
use crate::containers::HashMap;
use crate::containers::HashSet;
use crate::containers::KeyedVec;
use crate::unitprop_assert_eq_moderate;
use crate::unitprop_assert_moderate;

/// How a clause takes part in propagation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WatchStatus {
    /// The clause is watched by two distinct literals of the clause.
    Watched([Literal; 2]),
    /// The clause consists of a single literal, which is a unit from the start.
    Unit,
    /// The clause is satisfied and no longer watched.
    Retired,
}

/// The watch index: for every literal the clauses which watch it, and for every clause the
/// literals it is watched by.
#[derive(Clone, Debug, Default)]
pub(crate) struct WatchLists {
    watchers: HashMap<Literal, HashSet<ClauseId>>,
    status: KeyedVec<ClauseId, WatchStatus>,
}

impl WatchLists {
    /// Watches the first two literals of every clause with at least two literals.
    pub(crate) fn new(clauses: &ClauseStore) -> WatchLists {
        let mut watch_lists = WatchLists {
            watchers: HashMap::default(),
            status: KeyedVec::with_capacity(clauses.len()),
        };

        for (clause_id, clause) in clauses.iter() {
            let status = if clause.is_unit() {
                WatchStatus::Unit
            } else {
                WatchStatus::Watched([clause[0], clause[1]])
            };

            let pushed_id = watch_lists.status.push(status);
            unitprop_assert_eq_moderate!(pushed_id, clause_id);

            if let WatchStatus::Watched(watched) = status {
                watched
                    .into_iter()
                    .for_each(|literal| watch_lists.register(literal, clause_id));
            }
        }

        watch_lists
    }

    pub(crate) fn status(&self, clause_id: ClauseId) -> WatchStatus {
        self.status[clause_id]
    }

    /// Removes all watchers of `literal` from the index and returns them in ascending order.
    ///
    /// The status of the returned clauses still mentions `literal`; every one of them has to be
    /// watched again through [`WatchLists::watch`] or retired through [`WatchLists::retire`].
    pub(crate) fn take_watchers(&mut self, literal: Literal) -> Vec<ClauseId> {
        let mut watchers = self
            .watchers
            .remove(&literal)
            .map(|watchers| watchers.into_iter().collect::<Vec<_>>())
            .unwrap_or_default();
        watchers.sort_unstable();
        watchers
    }

    /// Returns the watched literal of `clause_id` which is not `false_literal`.
    pub(crate) fn other_watched_literal(
        &self,
        clause_id: ClauseId,
        false_literal: Literal,
    ) -> Literal {
        match self.status[clause_id] {
            WatchStatus::Watched([first, second]) if first == false_literal => second,
            WatchStatus::Watched([first, second]) => {
                unitprop_assert_moderate!(
                    second == false_literal,
                    "clause {clause_id} is visited for {false_literal} which it does not watch"
                );
                first
            }
            status => unreachable!(
                "clause {clause_id} is in the watch list of {false_literal} but is {status:?}"
            ),
        }
    }

    /// Makes `watched` the watched literals of `clause_id`.
    pub(crate) fn watch(&mut self, clause_id: ClauseId, watched: [Literal; 2]) {
        unitprop_assert_moderate!(watched[0] != watched[1]);

        self.status[clause_id] = WatchStatus::Watched(watched);
        watched
            .into_iter()
            .for_each(|literal| self.register(literal, clause_id));
    }

    /// Stops watching `clause_id`.
    pub(crate) fn retire(&mut self, clause_id: ClauseId) {
        if let WatchStatus::Watched(watched) = self.status[clause_id] {
            for literal in watched {
                if let Some(watchers) = self.watchers.get_mut(&literal) {
                    let _ = watchers.remove(&clause_id);
                    if watchers.is_empty() {
                        let _ = self.watchers.remove(&literal);
                    }
                }
            }
        }

        self.status[clause_id] = WatchStatus::Retired;
    }

    fn register(&mut self, literal: Literal, clause_id: ClauseId) {
        let _ = self.watchers.entry(literal).or_default().insert(clause_id);
    }

    fn is_watching(&self, literal: Literal, clause_id: ClauseId) -> bool {
        self.watchers
            .get(&literal)
            .is_some_and(|watchers| watchers.contains(&clause_id))
    }
}

// methods for debugging
impl WatchLists {
    /// Checks that the index and the status of the clauses describe the same watches.
    pub(crate) fn debug_check_state(&self, clauses: &ClauseStore) -> bool {
        assert_eq!(
            self.status.len(),
            clauses.len(),
            "Every clause should have a watch status."
        );

        for (literal, watchers) in &self.watchers {
            assert!(!watchers.is_empty(), "Empty watch list of {literal} is kept.");

            for &clause_id in watchers {
                assert!(
                    matches!(
                        self.status[clause_id],
                        WatchStatus::Watched(watched) if watched.contains(literal)
                    ),
                    "Clause {clause_id} is in the watch list of {literal} but does not watch it."
                );
            }
        }

        for (clause_id, clause) in clauses.iter() {
            if let WatchStatus::Watched([first, second]) = self.status[clause_id] {
                assert_ne!(first, second, "Clause {clause_id} watches {first} twice.");
                assert!(
                    clause.contains(first) && clause.contains(second),
                    "Clause {clause_id} watches a literal which is not part of it."
                );
                assert!(
                    self.is_watching(first, clause_id) && self.is_watching(second, clause_id),
                    "Clause {clause_id} is missing from the watch list of a watched literal."
                );
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::StorageKey;

    fn store(clauses: &[&[i32]]) -> ClauseStore {
        ClauseStore::new(
            clauses
                .iter()
                .map(|clause| clause.iter().copied().map(Literal::from_dimacs)),
        )
        .expect("no empty clauses")
    }

    fn id(index: usize) -> ClauseId {
        ClauseId::create_from_index(index)
    }

    fn lit(code: i32) -> Literal {
        Literal::from_dimacs(code)
    }

    #[test]
    fn first_two_literals_are_watched_initially() {
        let clauses = store(&[&[1, 2, 3], &[-4], &[-1, 4]]);
        let watch_lists = WatchLists::new(&clauses);

        assert_eq!(
            watch_lists.status(id(0)),
            WatchStatus::Watched([lit(1), lit(2)])
        );
        assert_eq!(watch_lists.status(id(1)), WatchStatus::Unit);
        assert_eq!(
            watch_lists.status(id(2)),
            WatchStatus::Watched([lit(-1), lit(4)])
        );
        assert!(watch_lists.is_watching(lit(1), id(0)));
        assert!(!watch_lists.is_watching(lit(3), id(0)));
        assert!(watch_lists.debug_check_state(&clauses));
    }

    #[test]
    fn taken_watchers_are_sorted_and_removed() {
        let clauses = store(&[&[2, 1], &[1, 3], &[1, -2]]);
        let mut watch_lists = WatchLists::new(&clauses);

        assert_eq!(watch_lists.take_watchers(lit(1)), vec![id(0), id(1), id(2)]);
        assert!(watch_lists.take_watchers(lit(1)).is_empty());
    }

    #[test]
    fn other_watched_literal_is_found_in_either_position() {
        let clauses = store(&[&[1, 2, 3]]);
        let watch_lists = WatchLists::new(&clauses);

        assert_eq!(watch_lists.other_watched_literal(id(0), lit(1)), lit(2));
        assert_eq!(watch_lists.other_watched_literal(id(0), lit(2)), lit(1));
    }

    #[test]
    fn replacing_a_watch_moves_the_clause() {
        let clauses = store(&[&[1, 2, 3]]);
        let mut watch_lists = WatchLists::new(&clauses);

        let _ = watch_lists.take_watchers(lit(1));
        watch_lists.watch(id(0), [lit(2), lit(3)]);

        assert_eq!(
            watch_lists.status(id(0)),
            WatchStatus::Watched([lit(2), lit(3)])
        );
        assert!(watch_lists.is_watching(lit(3), id(0)));
        assert!(watch_lists.is_watching(lit(2), id(0)));
        assert!(watch_lists.debug_check_state(&clauses));
    }

    #[test]
    fn retired_clauses_are_removed_from_all_watch_lists() {
        let clauses = store(&[&[1, 2, 3], &[2, 4]]);
        let mut watch_lists = WatchLists::new(&clauses);

        watch_lists.retire(id(0));

        assert_eq!(watch_lists.status(id(0)), WatchStatus::Retired);
        assert!(!watch_lists.is_watching(lit(1), id(0)));
        assert!(!watch_lists.is_watching(lit(2), id(0)));
        assert!(watch_lists.is_watching(lit(2), id(1)));
        assert!(watch_lists.debug_check_state(&clauses));
    }
}
