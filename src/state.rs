//! Service states and their labels and exit codes.
//!
//! These are fixed by the plugin API: a monitoring core reads the process
//! exit code first and only uses the label embedded in the summary line for
//! display.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::PluginError;

pub const STATE_OK_LABEL: &str = "OK";
pub const STATE_WARNING_LABEL: &str = "WARNING";
pub const STATE_CRITICAL_LABEL: &str = "CRITICAL";
pub const STATE_UNKNOWN_LABEL: &str = "UNKNOWN";

pub const STATE_OK_EXIT_CODE: i32 = 0;
pub const STATE_WARNING_EXIT_CODE: i32 = 1;
pub const STATE_CRITICAL_EXIT_CODE: i32 = 2;
pub const STATE_UNKNOWN_EXIT_CODE: i32 = 3;

/// Outcome of a check as understood by the monitoring core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ServiceState {
    #[default]
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    /// All states in exit code order.
    pub const ALL: [Self; 4] = [Self::Ok, Self::Warning, Self::Critical, Self::Unknown];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => STATE_OK_LABEL,
            Self::Warning => STATE_WARNING_LABEL,
            Self::Critical => STATE_CRITICAL_LABEL,
            Self::Unknown => STATE_UNKNOWN_LABEL,
        }
    }

    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Ok => STATE_OK_EXIT_CODE,
            Self::Warning => STATE_WARNING_EXIT_CODE,
            Self::Critical => STATE_CRITICAL_EXIT_CODE,
            Self::Unknown => STATE_UNKNOWN_EXIT_CODE,
        }
    }

    /// Looks up the state for a numeric exit code.
    ///
    /// Returns `None` for anything outside the four plugin exit codes.
    #[must_use]
    pub const fn from_exit_code(code: i32) -> Option<Self> {
        match code {
            STATE_OK_EXIT_CODE => Some(Self::Ok),
            STATE_WARNING_EXIT_CODE => Some(Self::Warning),
            STATE_CRITICAL_EXIT_CODE => Some(Self::Critical),
            STATE_UNKNOWN_EXIT_CODE => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ServiceState {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            STATE_OK_LABEL => Ok(Self::Ok),
            STATE_WARNING_LABEL | "WARN" => Ok(Self::Warning),
            STATE_CRITICAL_LABEL | "CRIT" => Ok(Self::Critical),
            STATE_UNKNOWN_LABEL => Ok(Self::Unknown),
            _ => Err(PluginError::InvalidState(s.to_string())),
        }
    }
}

impl Serialize for ServiceState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
