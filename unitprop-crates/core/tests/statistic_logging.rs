#![cfg(test)]

use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use unitprop_core::statistics::configure_statistic_logging;
use unitprop_core::statistics::log_statistic_postfix;
use unitprop_core::Literal;
use unitprop_core::UnitPropagator;

#[derive(Clone, Debug, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .expect("buffer is not poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// The statistic writer can only be configured once per process, so everything is checked in a
// single test.
#[test]
fn statistics_are_written_with_prefix_and_postfix() {
    let buffer = SharedBuffer::default();
    configure_statistic_logging("c STAT", Some("c END"), Some(Box::new(buffer.clone())));

    let clauses = [[1, 2], [-2, 3]].map(|clause| clause.map(Literal::from_dimacs));
    let mut propagator = UnitPropagator::new(clauses).expect("consistent");
    let _ = propagator
        .add_unit(Literal::from_dimacs(-1))
        .expect("consistent");

    propagator.log_statistics("propagator");
    log_statistic_postfix();

    let output = String::from_utf8(buffer.0.lock().expect("buffer is not poisoned").clone())
        .expect("statistics are valid utf-8");
    let lines = output.lines().collect::<Vec<_>>();

    assert_eq!(
        lines,
        vec![
            "c STAT propagator_num_processed_units=3",
            "c STAT propagator_num_enqueued_units=3",
            "c STAT propagator_num_watch_visits=2",
            "c STAT propagator_num_watch_replacements=0",
            "c STAT propagator_num_retired_clauses=2",
            "c STAT propagator_num_inconsistencies=0",
            "c END",
        ]
    );
}
