//! Append-only record of errors and threshold descriptions for one run.

use std::fmt::{self, Write};

use crate::error::BoxError;

/// Errors keep their display text from the moment they were recorded, so
/// rendering never calls back into caller `Display` impls.
#[derive(Debug, Default)]
pub struct Collector {
    errors: Vec<BoxError>,
    error_lines: Vec<String>,
    thresholds: Vec<String>,
}

impl Collector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error. Duplicates are kept.
    pub fn record_error(&mut self, err: impl Into<BoxError>) {
        let err = err.into();
        self.error_lines.push(display_line(&err));
        self.errors.push(err);
    }

    /// Records a threshold description by its display text.
    pub fn record_threshold(&mut self, desc: impl fmt::Display) {
        self.thresholds.push(display_line(&desc));
    }

    #[must_use]
    pub fn errors(&self) -> &[BoxError] {
        &self.errors
    }

    #[must_use]
    pub fn thresholds(&self) -> &[String] {
        &self.thresholds
    }

    /// One output line per recorded error.
    #[must_use]
    pub fn error_lines(&self) -> &[String] {
        &self.error_lines
    }

    /// One output line per recorded threshold.
    #[must_use]
    pub fn threshold_lines(&self) -> Vec<String> {
        self.thresholds.iter().map(|t| single_line(t)).collect()
    }
}

/// Display text of `value` folded onto one line.
///
/// A `Display` impl that fails keeps whatever it wrote before failing.
pub(crate) fn display_line<T: fmt::Display + ?Sized>(value: &T) -> String {
    let mut text = String::new();
    let _ = write!(text, "{value}");
    single_line(&text)
}

/// Folds line breaks into single spaces.
pub(crate) fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
