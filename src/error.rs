use thiserror::Error;

use crate::perfdata::MetricRule;

/// Boxed error value as recorded by check code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Invalid performance metric #{index} '{label}': {rule}")]
    InvalidMetric {
        index: usize,
        label: String,
        rule: MetricRule,
    },

    #[error("Duplicate performance metric label: {label}")]
    DuplicateMetric { label: String },

    #[error("Invalid range '{0}'")]
    InvalidRange(String),

    #[error("Unknown service state: {0}")]
    InvalidState(String),

    #[error("Service output is empty")]
    EmptyServiceOutput,

    #[error("Exit code {code} ({label}) used together with a recorded error: {error}")]
    MisconfiguredExitCode {
        code: i32,
        label: &'static str,
        error: String,
    },

    #[error("Exit code {0} is not a valid plugin exit code")]
    InvalidExitCode(i32),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl PluginError {
    /// Returns a short category name used in diagnostics.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidMetric { .. } | Self::DuplicateMetric { .. } | Self::InvalidRange(_) => {
                "PerfData"
            }
            Self::InvalidState(_) | Self::InvalidExitCode(_) => "State",
            Self::EmptyServiceOutput | Self::MisconfiguredExitCode { .. } => "Misuse",
            Self::Config(_) | Self::TomlParse(_) => "Config",
            Self::Io(_) => "IO",
            Self::JsonSerialize(_) => "Serialization",
        }
    }
}

pub type Result<T> = std::result::Result<T, PluginError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
