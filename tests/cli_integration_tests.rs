//! Integration tests for the report the binary writes and the exit code it
//! returns.

mod common;

use common::{EXIT_CRITICAL, EXIT_OK, EXIT_UNKNOWN, EXIT_WARNING};
use predicates::prelude::*;

// =============================================================================
// Exit Codes
// =============================================================================

#[test]
fn exit_code_matches_each_state() {
    for (state, code) in [
        ("OK", EXIT_OK),
        ("WARNING", EXIT_WARNING),
        ("CRITICAL", EXIT_CRITICAL),
        ("UNKNOWN", EXIT_UNKNOWN),
    ] {
        monitoring_plugin!()
            .args(["--state", state, "--summary", &format!("{state}: demo")])
            .assert()
            .code(code)
            .stdout(format!("{state}: demo \n"));
    }
}

#[test]
fn state_is_case_insensitive() {
    monitoring_plugin!()
        .args(["--state", "crit", "--summary", "CRITICAL: down"])
        .assert()
        .code(EXIT_CRITICAL);
}

#[test]
fn unknown_state_reports_unknown() {
    monitoring_plugin!()
        .args(["--state", "MAYBE", "--summary", "OK: fine"])
        .assert()
        .code(EXIT_UNKNOWN)
        .stdout(predicate::str::starts_with("UNKNOWN: fine"))
        .stdout(predicate::str::contains("* Unknown service state: MAYBE"));
}

#[test]
fn invalid_arguments_report_unknown() {
    monitoring_plugin!()
        .arg("--no-such-flag")
        .assert()
        .code(EXIT_UNKNOWN)
        .stdout(predicate::str::starts_with(
            "UNKNOWN: invalid command line arguments",
        ));
}

#[test]
fn help_exits_successfully() {
    monitoring_plugin!()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--perfdata"));
}

// =============================================================================
// Report Layout
// =============================================================================

#[test]
fn perfdata_follows_summary_after_pipe() {
    monitoring_plugin!()
        .args(["--summary", "OK: fast", "-p", "time=42ms"])
        .assert()
        .code(EXIT_OK)
        .stdout("OK: fast | time=42ms;;;; \n");
}

#[test]
fn pipe_in_summary_does_not_start_perfdata() {
    monitoring_plugin!()
        .args(["--summary", "OK: a|b", "-p", "t=1"])
        .assert()
        .code(EXIT_OK)
        .stdout("OK: a¦b | t=1;;;; \n");
}

#[test]
fn quoted_labels_survive_round_trip() {
    monitoring_plugin!()
        .args(["--summary", "OK", "-p", "'disk used'=80%;85;95;0;100"])
        .assert()
        .code(EXIT_OK)
        .stdout("OK | 'disk used'=80%;85;95;0;100 \n");
}

#[test]
fn sections_render_in_fixed_order() {
    monitoring_plugin!()
        .args([
            "--state",
            "CRITICAL",
            "--summary",
            "CRITICAL: 2 problems",
            "--long-output",
            "host: db01",
            "-t",
            "CRITICAL: > 90%",
            "-e",
            "disk full",
            "--branding",
            "check_demo v0.1.0",
        ])
        .assert()
        .code(EXIT_CRITICAL)
        .stdout(
            "CRITICAL: 2 problems \n \nERRORS: \n* disk full \n \nTHRESHOLDS: \n\
             * CRITICAL: > 90% \n \nDETAILED INFO: \nhost: db01 \ncheck_demo v0.1.0 \n",
        );
}

#[test]
fn hidden_sections_are_not_printed() {
    monitoring_plugin!()
        .args([
            "--summary",
            "OK",
            "-e",
            "ignored",
            "-t",
            "ignored",
            "--hide-errors",
            "--hide-thresholds",
        ])
        .assert()
        .code(EXIT_OK)
        .stdout("OK \n");
}

#[test]
fn empty_summary_prints_sentinel_and_error() {
    monitoring_plugin!()
        .assert()
        .code(EXIT_OK)
        .stdout(predicate::str::starts_with("(no service output) \n"))
        .stdout(predicate::str::contains("* Service output is empty"));
}

#[test]
fn allowed_empty_summary_prints_sentinel_only() {
    monitoring_plugin!()
        .arg("--allow-empty-summary")
        .assert()
        .code(EXIT_OK)
        .stdout("(no service output) \n");
}

// =============================================================================
// Misuse Correction
// =============================================================================

#[test]
fn duplicate_perfdata_with_ok_state_becomes_unknown() {
    monitoring_plugin!()
        .args(["--summary", "OK: fine", "-p", "a=1", "-p", "a=2"])
        .assert()
        .code(EXIT_UNKNOWN)
        .stdout(predicate::str::starts_with("UNKNOWN: fine \n"))
        .stdout(predicate::str::contains(
            "* Duplicate performance metric label: a",
        ));
}

#[test]
fn duplicate_perfdata_keeps_failing_state() {
    monitoring_plugin!()
        .args([
            "--state",
            "WARNING",
            "--summary",
            "WARNING: slow",
            "-p",
            "a=1",
            "-p",
            "a=2",
        ])
        .assert()
        .code(EXIT_WARNING)
        .stdout(predicate::str::starts_with("WARNING: slow \n"));
}

#[test]
fn allowed_duplicate_perfdata_replaces_value() {
    monitoring_plugin!()
        .args([
            "--summary",
            "OK",
            "-p",
            "a=1",
            "-p",
            "b=5",
            "-p",
            "a=2",
            "--allow-duplicate-perfdata",
        ])
        .assert()
        .code(EXIT_OK)
        .stdout("OK | a=2;;;; b=5;;;; \n");
}

#[test]
fn min_greater_than_max_is_rejected() {
    monitoring_plugin!()
        .args(["--summary", "OK", "-p", "load=3;;;10;5"])
        .assert()
        .code(EXIT_UNKNOWN)
        .stdout(predicate::str::contains("load=3").not())
        .stdout(predicate::str::contains("min 10 is greater than max 5"));
}

// =============================================================================
// Panic Handling
// =============================================================================

#[test]
fn panic_reports_critical() {
    monitoring_plugin!()
        .args(["--summary", "OK: fine", "-p", "time=1s", "--panic", "boom"])
        .assert()
        .code(EXIT_CRITICAL)
        .stdout(predicate::str::starts_with(
            "CRITICAL: plugin crash/panic: boom",
        ))
        .stdout(predicate::str::contains("Stacktrace:"));
}

#[test]
fn panic_wins_over_requested_state() {
    monitoring_plugin!()
        .args(["--state", "UNKNOWN", "--summary", "x", "--panic", "boom"])
        .assert()
        .code(EXIT_CRITICAL);
}

// =============================================================================
// Scoped Exit Guard
// =============================================================================

#[test]
fn guard_writes_report_on_normal_drop() {
    monitoring_plugin!()
        .args([
            "--guard",
            "--state",
            "WARNING",
            "--summary",
            "WARNING: slow",
            "-p",
            "a=1",
        ])
        .assert()
        .code(EXIT_WARNING)
        .stdout("WARNING: slow | a=1;;;; \n");
}

#[test]
fn guard_records_apply_error_as_last_error() {
    monitoring_plugin!()
        .args(["--guard", "--summary", "OK: fine", "-p", "a=1", "-p", "a=1"])
        .assert()
        .code(EXIT_UNKNOWN)
        .stdout(predicate::str::starts_with("UNKNOWN: fine \n"))
        .stdout(predicate::str::contains(
            "* Duplicate performance metric label: a",
        ));
}

#[test]
fn guard_reports_panic_while_unwinding() {
    monitoring_plugin!()
        .args([
            "--guard",
            "--state",
            "OK",
            "--summary",
            "OK: fine",
            "-p",
            "time=1s",
            "--panic",
            "boom",
        ])
        .assert()
        .code(EXIT_CRITICAL)
        .stdout(predicate::str::starts_with(
            "CRITICAL: plugin crash/panic: boom | time=1s;;;;",
        ))
        .stdout(predicate::str::contains("Panic location:"))
        .stdout(predicate::str::contains("src/cli.rs"))
        .stdout(predicate::str::contains("Stacktrace:"));
}

#[test]
fn guard_panic_drops_branding() {
    monitoring_plugin!()
        .args([
            "--guard",
            "--summary",
            "OK",
            "--branding",
            "check_demo v1",
            "--panic",
            "boom",
        ])
        .assert()
        .code(EXIT_CRITICAL)
        .stdout(predicate::str::contains("check_demo v1").not());
}

// =============================================================================
// Output Formats and Logging
// =============================================================================

#[test]
fn json_format_emits_document() {
    monitoring_plugin!()
        .args([
            "--format",
            "json",
            "--state",
            "WARNING",
            "--summary",
            "WARNING: slow",
            "-p",
            "latency=812ms;500",
        ])
        .assert()
        .code(EXIT_WARNING)
        .stdout(predicate::str::contains(r#""state": "WARNING""#))
        .stdout(predicate::str::contains(r#""label": "latency""#));
}

#[test]
fn logs_go_to_stderr_only() {
    monitoring_plugin!()
        .args(["-vv", "--summary", "OK", "-p", "a=1"])
        .assert()
        .code(EXIT_OK)
        .stdout("OK | a=1;;;; \n")
        .stderr(predicate::str::contains("performance metric accepted"));
}
