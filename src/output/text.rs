use crate::collector::single_line;
use crate::error::Result;
use crate::plugin::Plugin;

use super::{
    CHECK_OUTPUT_EOL, EMPTY_SERVICE_OUTPUT_SENTINEL, OutputFormatter, PIPE_REPLACEMENT,
    SECTION_ITEM_MARKER,
};

/// Renders the plugin text format understood by the monitoring core.
///
/// ```text
/// <summary>[ | <perfdata>]
///
/// ERRORS:
/// * <error>
///
/// THRESHOLDS:
/// * <threshold>
///
/// DETAILED INFO:
/// <long output>
/// [<branding>]
/// ```
///
/// Every line ends with [`CHECK_OUTPUT_EOL`]. Sections without content, and
/// hidden sections, are left out entirely. A `|` in caller text is replaced
/// by [`PIPE_REPLACEMENT`]; only the perfdata separator stays a real pipe.
pub struct TextFormatter;

impl TextFormatter {
    /// Renders the report. Never fails.
    #[must_use]
    pub fn render(plugin: &Plugin) -> String {
        let mut output = String::new();

        Self::write_summary(plugin, &mut output);

        let sections = plugin.sections();
        if !sections.hide_errors {
            Self::write_list_section(&mut output, sections.errors_label(), &plugin.error_lines());
        }
        if !sections.hide_thresholds {
            Self::write_list_section(
                &mut output,
                sections.thresholds_label(),
                &plugin.threshold_lines(),
            );
        }
        Self::write_detailed_info(
            &mut output,
            sections.detailed_info_label(),
            plugin.long_service_output(),
        );

        if let Some(trailer) = plugin.branding_trailer() {
            for line in content_lines(&trailer) {
                push_line(&mut output, line);
            }
        }

        output
    }

    fn write_summary(plugin: &Plugin, output: &mut String) {
        let summary = single_line(plugin.service_output());
        if summary.is_empty() {
            output.push_str(EMPTY_SERVICE_OUTPUT_SENTINEL);
        } else {
            output.push_str(&escape_pipes(&summary));
        }

        let perf_data = plugin.perf_data();
        if !perf_data.is_empty() {
            output.push_str(" | ");
            output.push_str(&perf_data.render());
        }
        output.push_str(CHECK_OUTPUT_EOL);
    }

    fn write_list_section(output: &mut String, label: &str, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        Self::write_header(output, label);
        for line in lines {
            output.push_str(SECTION_ITEM_MARKER);
            push_line(output, line);
        }
    }

    fn write_detailed_info(output: &mut String, label: &str, long_output: &str) {
        let lines = content_lines(long_output);
        if lines.is_empty() {
            return;
        }
        Self::write_header(output, label);
        for line in lines {
            push_line(output, line);
        }
    }

    fn write_header(output: &mut String, label: &str) {
        output.push_str(CHECK_OUTPUT_EOL);
        output.push_str(&escape_pipes(label));
        output.push(':');
        output.push_str(CHECK_OUTPUT_EOL);
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, plugin: &Plugin) -> Result<String> {
        Ok(Self::render(plugin))
    }
}

fn push_line(output: &mut String, line: &str) {
    output.push_str(&escape_pipes(line));
    output.push_str(CHECK_OUTPUT_EOL);
}

fn escape_pipes(text: &str) -> String {
    text.replace('|', PIPE_REPLACEMENT)
}

/// Splits multi-line text, dropping trailing whitespace and surrounding
/// blank lines so the caller's own line endings never double up with ours.
fn content_lines(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].to_vec(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
