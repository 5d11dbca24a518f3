#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use helpers::instance_path;
use helpers::run_unitprop;
use regex::Regex;

macro_rules! test_cnf_instance {
    ($name:ident, $instance:literal, [$($arg:literal),*], $status:literal, $expected:literal) => {
        #[test]
        fn $name() {
            run_cnf_test(stringify!($name), $instance, &[$($arg),*], $status, $expected);
        }
    };
}

test_cnf_instance!(no_assumptions, "single_clause.cnf", [], "CONSISTENT", r"^v 0$");
test_cnf_instance!(
    watched_literal_is_forced,
    "single_clause.cnf",
    ["--assume=-3,1"],
    "CONSISTENT",
    r"^v 1 -2 -3 0$"
);
test_cnf_instance!(
    unit_clauses_are_propagated,
    "implication_chain.cnf",
    [],
    "CONSISTENT",
    r"^v 1 2 3 0$"
);
test_cnf_instance!(
    assumption_completes_chain,
    "implication_chain.cnf",
    ["-a", "-4"],
    "CONSISTENT",
    r"^v 1 2 3 -4 5 0$"
);
test_cnf_instance!(
    assumption_falsifies_clause,
    "all_assignments_excluded.cnf",
    ["-a", "-1"],
    "INCONSISTENT",
    r"^c clause 1 can no longer be satisfied, its last remaining literal -2 is false$"
);
test_cnf_instance!(
    complementary_unit_clauses,
    "complementary_units.cnf",
    [],
    "INCONSISTENT",
    r"^c tried to add -2 as a unit but its negation is already a unit$"
);
test_cnf_instance!(
    empty_clause,
    "empty_clause.cnf",
    [],
    "INCONSISTENT",
    r"^c clause 1 is empty$"
);
test_cnf_instance!(
    assumption_contradicting_unit,
    "implication_chain.cnf",
    ["-a", "4,-3"],
    "INCONSISTENT",
    r"^c tried to add -3 as a unit but its negation is already a unit$"
);

fn run_cnf_test(run_name: &str, instance: &str, args: &[&str], status: &str, expected: &str) {
    let (files, exit_status) =
        run_unitprop(instance_path(instance), run_name, args.iter().copied());
    assert!(exit_status.success(), "unitprop failed with {exit_status}");

    let output = files.read_log();

    let status_line = Regex::new(&format!("(?m)^s {status}$")).expect("valid regex");
    assert!(
        status_line.is_match(&output),
        "expected 's {status}' in the output:\n{output}"
    );

    let expected = Regex::new(&format!("(?m){expected}")).expect("valid regex");
    assert!(
        expected.is_match(&output),
        "expected a line matching '{expected}' in the output:\n{output}"
    );

    files.cleanup().expect("Failed to clean up output files");
}

#[test]
fn statistics_are_logged_on_request() {
    let (files, exit_status) = run_unitprop(
        instance_path("implication_chain.cnf"),
        "statistics_are_logged_on_request",
        ["-s"],
    );
    assert!(exit_status.success());

    let output = files.read_log();
    let statistic =
        Regex::new(r"(?m)^c STAT propagation_num_processed_units=3$").expect("valid regex");
    assert!(statistic.is_match(&output), "missing statistic in:\n{output}");

    files.cleanup().expect("Failed to clean up output files");
}

#[test]
fn statistics_are_logged_when_construction_is_inconsistent() {
    let (files, exit_status) = run_unitprop(
        instance_path("complementary_units.cnf"),
        "statistics_are_logged_when_construction_is_inconsistent",
        ["-s"],
    );
    assert!(exit_status.success());

    let output = files.read_log();
    assert!(output.contains("s INCONSISTENT"), "missing status in:\n{output}");
    let statistic =
        Regex::new(r"(?m)^c STAT propagation_num_inconsistencies=1$").expect("valid regex");
    assert!(statistic.is_match(&output), "missing statistic in:\n{output}");

    files.cleanup().expect("Failed to clean up output files");
}

#[test]
fn zero_is_not_a_valid_assumption() {
    let (files, exit_status) = run_unitprop(
        instance_path("single_clause.cnf"),
        "zero_is_not_a_valid_assumption",
        ["-a", "0"],
    );

    assert_eq!(exit_status.code(), Some(1));
    assert!(!files.read_log().contains("s CONSISTENT"));
    files.cleanup().expect("Failed to clean up output files");
}

#[test]
fn assumption_over_undeclared_variable_is_rejected() {
    let (files, exit_status) = run_unitprop(
        instance_path("single_clause.cnf"),
        "assumption_over_undeclared_variable_is_rejected",
        ["-a", "4"],
    );

    assert_eq!(exit_status.code(), Some(1));
    files.cleanup().expect("Failed to clean up output files");
}

#[test]
fn invalid_dimacs_is_rejected() {
    let (files, exit_status) = run_unitprop(
        instance_path("undeclared_variable.cnf"),
        "invalid_dimacs_is_rejected",
        [],
    );

    assert_eq!(exit_status.code(), Some(1));
    assert!(files.read_log().contains("The dimacs file was invalid"));
    files.cleanup().expect("Failed to clean up output files");
}

#[test]
fn minimum_code_is_rejected_as_invalid_literal() {
    let (files, exit_status) = run_unitprop(
        instance_path("minimum_code.cnf"),
        "minimum_code_is_rejected_as_invalid_literal",
        [],
    );

    assert_eq!(exit_status.code(), Some(1));
    let output = files.read_log();
    assert!(output.contains("The dimacs file was invalid"), "{output}");
    assert!(!output.contains("s CONSISTENT"));
    files.cleanup().expect("Failed to clean up output files");
}

#[test]
fn unsupported_file_extension_is_rejected() {
    let (files, exit_status) = run_unitprop(
        instance_path("wrong_extension.txt"),
        "unsupported_file_extension_is_rejected",
        [],
    );

    assert_eq!(exit_status.code(), Some(1));
    files.cleanup().expect("Failed to clean up output files");
}
