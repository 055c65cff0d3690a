mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::error::Result;
use crate::plugin::Plugin;

/// Line terminator used throughout the report.
///
/// Nagios XI only keeps line breaks that are preceded by a space; Nagios
/// Core ignores the trailing space.
pub const CHECK_OUTPUT_EOL: &str = " \n";

/// Summary text emitted when the service output is empty.
pub const EMPTY_SERVICE_OUTPUT_SENTINEL: &str = "(no service output)";

/// Stands in for `|` in report text. The monitoring core reads everything
/// after a pipe as performance data.
pub const PIPE_REPLACEMENT: &str = "¦";

/// Prefix of every entry in the Errors and Thresholds sections.
pub const SECTION_ITEM_MARKER: &str = "* ";

pub const DEFAULT_ERRORS_LABEL: &str = "ERRORS";
pub const DEFAULT_THRESHOLDS_LABEL: &str = "THRESHOLDS";
pub const DEFAULT_DETAILED_INFO_LABEL: &str = "DETAILED INFO";

/// Trait for formatting a plugin's accumulated state into a report.
pub trait OutputFormatter {
    /// Format the plugin state into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, plugin: &Plugin) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Returns a formatter for this format.
    #[must_use]
    pub fn formatter(self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "nagios" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Section header overrides and visibility flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionSettings {
    pub errors_label: Option<String>,
    pub thresholds_label: Option<String>,
    pub detailed_info_label: Option<String>,
    pub hide_errors: bool,
    pub hide_thresholds: bool,
}

impl SectionSettings {
    #[must_use]
    pub fn errors_label(&self) -> &str {
        label_or(self.errors_label.as_deref(), DEFAULT_ERRORS_LABEL)
    }

    #[must_use]
    pub fn thresholds_label(&self) -> &str {
        label_or(self.thresholds_label.as_deref(), DEFAULT_THRESHOLDS_LABEL)
    }

    #[must_use]
    pub fn detailed_info_label(&self) -> &str {
        label_or(self.detailed_info_label.as_deref(), DEFAULT_DETAILED_INFO_LABEL)
    }
}

// An override that is blank would produce a bare ":" header.
fn label_or<'a>(custom: Option<&'a str>, default: &'a str) -> &'a str {
    custom.map(str::trim).filter(|l| !l.is_empty()).unwrap_or(default)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
