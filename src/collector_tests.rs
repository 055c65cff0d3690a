use std::fmt;

use super::*;

#[derive(Debug)]
struct Wrapped {
    context: &'static str,
    inner: std::io::Error,
}

impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\n  {}", self.context, self.inner)
    }
}

impl std::error::Error for Wrapped {}

#[test]
fn preserves_recording_order_and_duplicates() {
    let mut collector = Collector::new();
    collector.record_error("first");
    collector.record_error("second");
    collector.record_error("first");

    assert_eq!(collector.error_lines(), ["first", "second", "first"]);
}

#[test]
fn thresholds_keep_display_text() {
    let mut collector = Collector::new();
    collector.record_threshold("WARNING: 80%");
    collector.record_threshold(format_args!("CRITICAL: {}%", 90));

    assert_eq!(collector.thresholds(), ["WARNING: 80%", "CRITICAL: 90%"]);
}

#[test]
fn nested_errors_flatten_to_one_line() {
    let mut collector = Collector::new();
    collector.record_error(Wrapped {
        context: "fetching certificate",
        inner: std::io::Error::other("connection reset"),
    });

    assert_eq!(
        collector.error_lines(),
        ["fetching certificate: connection reset"]
    );
}

#[test]
fn accepts_owned_strings_and_error_types() {
    let mut collector = Collector::new();
    collector.record_error(String::from("owned"));
    collector.record_error(std::io::Error::other("io"));

    assert_eq!(collector.errors().len(), 2);
    assert_eq!(collector.error_lines()[1], "io");
}

#[test]
fn single_line_folds_crlf_and_blank_lines() {
    assert_eq!(single_line("a\r\n\r\nb\n c "), "a b c");
    assert_eq!(single_line(""), "");
}

#[derive(Debug)]
struct Truncated;

impl fmt::Display for Truncated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("partial text")?;
        Err(fmt::Error)
    }
}

impl std::error::Error for Truncated {}

#[test]
fn failing_display_keeps_partial_text() {
    let mut collector = Collector::new();
    collector.record_error(Truncated);
    collector.record_threshold(Truncated);

    assert_eq!(collector.error_lines(), ["partial text"]);
    assert_eq!(collector.thresholds(), ["partial text"]);
}

#[test]
fn display_line_folds_line_breaks() {
    assert_eq!(display_line("a\nb"), "a b");
    assert_eq!(display_line(&Truncated), "partial text");
}
