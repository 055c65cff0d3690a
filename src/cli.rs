use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigLoader, FileConfigLoader};
use crate::error::Result;
use crate::output::OutputFormat;
use crate::perfdata::PerformanceData;
use crate::plugin::{Plugin, StaticBranding};
use crate::state::ServiceState;

#[derive(Parser, Debug)]
#[command(name = "monitoring-plugin")]
#[command(author, version, about = "Emit a monitoring plugin report from the command line")]
#[command(long_about = "Builds a Nagios-compatible plugin report from its arguments, \
    writes it to stdout and exits with the matching state code.\n\n\
    Exit codes:\n  \
    0 - OK\n  \
    1 - WARNING\n  \
    2 - CRITICAL\n  \
    3 - UNKNOWN")]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Increase log verbosity on stderr (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Service state: OK, WARNING, CRITICAL or UNKNOWN
    #[arg(short, long, default_value = "OK")]
    pub state: String,

    /// One-line summary shown by the monitoring core
    #[arg(long, default_value = "")]
    pub summary: String,

    /// Detailed output, printed verbatim after the other sections
    #[arg(long)]
    pub long_output: Option<String>,

    /// Performance metric as `label=value[UOM];warn;crit;min;max` (repeatable)
    #[arg(short, long = "perfdata")]
    pub perfdata: Vec<String>,

    /// Let a repeated metric label replace the earlier metric
    #[arg(long)]
    pub allow_duplicate_perfdata: bool,

    /// Error line for the errors section (repeatable)
    #[arg(short, long = "error")]
    pub error: Vec<String>,

    /// Threshold description for the thresholds section (repeatable)
    #[arg(short, long = "threshold")]
    pub threshold: Vec<String>,

    /// Header for the errors section
    #[arg(long)]
    pub errors_label: Option<String>,

    /// Header for the thresholds section
    #[arg(long)]
    pub thresholds_label: Option<String>,

    /// Header for the detailed info section
    #[arg(long)]
    pub detailed_info_label: Option<String>,

    /// Never print the errors section
    #[arg(long)]
    pub hide_errors: bool,

    /// Never print the thresholds section
    #[arg(long)]
    pub hide_thresholds: bool,

    /// Do not report an empty summary as an error
    #[arg(long)]
    pub allow_empty_summary: bool,

    /// Trailer line appended after all sections
    #[arg(long)]
    pub branding: Option<String>,

    /// Path to a TOML report configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Panic with this message while the check runs
    #[arg(long, hide = true)]
    pub panic: Option<String>,

    /// Finish through a scoped exit guard instead of a check closure
    #[arg(long, hide = true)]
    pub guard: bool,
}

impl Cli {
    /// Transfers the arguments into `plugin`.
    ///
    /// The state is applied first so an early error keeps any failing state
    /// the caller asked for. Configuration file settings are applied before
    /// the explicit flags, which take precedence.
    ///
    /// # Errors
    /// Returns an error for an unknown state, an unreadable configuration
    /// file or invalid performance data.
    ///
    /// # Panics
    /// When `--panic` is given.
    pub fn apply(&self, plugin: &mut Plugin) -> Result<()> {
        plugin.set_output_format(self.format);
        plugin.set_service_output(self.summary.as_str());
        if let Some(long_output) = &self.long_output {
            plugin.set_long_service_output(long_output.as_str());
        }
        plugin.set_state(self.state.parse::<ServiceState>()?);

        if let Some(path) = &self.config {
            let config = FileConfigLoader::new().load_from_path(path)?;
            plugin.apply_config(&config);
        }
        self.apply_presentation(plugin);

        for error in &self.error {
            plugin.add_error(error.as_str());
        }
        for threshold in &self.threshold {
            plugin.add_threshold(threshold);
        }

        let metrics = self
            .perfdata
            .iter()
            .map(|raw| raw.parse::<PerformanceData>())
            .collect::<Result<Vec<_>>>()?;
        plugin.add_perf_data(self.allow_duplicate_perfdata, metrics)?;

        if let Some(message) = &self.panic {
            panic!("{message}");
        }
        Ok(())
    }

    fn apply_presentation(&self, plugin: &mut Plugin) {
        if let Some(label) = &self.errors_label {
            plugin.set_errors_label(label.as_str());
        }
        if let Some(label) = &self.thresholds_label {
            plugin.set_thresholds_label(label.as_str());
        }
        if let Some(label) = &self.detailed_info_label {
            plugin.set_detailed_info_label(label.as_str());
        }
        if self.hide_errors {
            plugin.hide_errors_section();
        }
        if self.hide_thresholds {
            plugin.hide_thresholds_section();
        }
        if self.allow_empty_summary {
            plugin.allow_empty_service_output();
        }
        if let Some(text) = &self.branding {
            plugin.set_branding(StaticBranding(text.clone()));
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
