//! Logging setup.
//!
//! The library only emits `tracing` events under [`TARGET`]; it never
//! installs a subscriber. Binaries call [`init_tracing`], which always logs
//! to stderr because stdout carries the report.

use tracing::Level;

/// Target used by all events emitted by this crate.
///
/// ```text
/// MONITORING_PLUGIN_LOG=debug
/// ```
pub const TARGET: &str = "monitoring_plugin";

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "MONITORING_PLUGIN_LOG";

/// Parse a log level string (case-insensitive).
///
/// Recognized values: `trace`, `debug`, `info`, `warn`, `error`.
#[must_use]
pub fn parse_level(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Maps a `-v` count to a level: none → warn, `-v` → info, `-vv` → debug,
/// more → trace.
#[must_use]
pub const fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Resolves the level from [`LOG_LEVEL_ENV`], falling back to `default`.
#[must_use]
pub fn level_from_env(default: Level) -> Level {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(default)
}

/// Installs a stderr `fmt` subscriber.
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing(verbose: u8) {
    let level = level_from_env(level_for_verbosity(verbose));
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
