use serde::Serialize;

use crate::error::Result;
use crate::perfdata::PerformanceData;
use crate::plugin::Plugin;
use crate::state::ServiceState;

use super::OutputFormatter;

/// Structured dump of the report content, for tooling and debugging.
///
/// The monitoring core itself only understands the text format.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    state: ServiceState,
    exit_code: i32,
    service_output: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    thresholds: Vec<String>,
    #[serde(skip_serializing_if = "str::is_empty")]
    long_service_output: &'a str,
    perf_data: Vec<&'a PerformanceData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branding: Option<String>,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, plugin: &Plugin) -> Result<String> {
        let state = plugin.state();
        let sections = plugin.sections();
        let output = JsonOutput {
            state,
            exit_code: state.exit_code(),
            service_output: plugin.service_output(),
            errors: if sections.hide_errors {
                Vec::new()
            } else {
                plugin.error_lines()
            },
            thresholds: if sections.hide_thresholds {
                Vec::new()
            } else {
                plugin.threshold_lines()
            },
            long_service_output: plugin.long_service_output(),
            perf_data: plugin.perf_data().iter().collect(),
            branding: plugin.branding_trailer(),
        };
        let json = serde_json::to_string_pretty(&output)?;
        Ok(format!("{json}\n"))
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
