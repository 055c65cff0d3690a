//! The exit coordinator: the object a check configures during its run and
//! that turns the accumulated state into the final report and exit code.
//!
//! ```no_run
//! use monitoring_plugin::{Plugin, PerformanceData, ServiceState};
//!
//! Plugin::new().run(|plugin| {
//!     plugin.set_service_output("OK: certificate valid for 87 days");
//!     plugin.set_state(ServiceState::Ok);
//!     let _ = plugin.add_perf_data(false, [PerformanceData::new("days", "87")]);
//! });
//! ```

mod branding;
mod exit;
mod finalize;
mod panic_capture;

use std::fmt;

pub use branding::{Branding, StaticBranding};
pub use exit::{ExitGuard, terminate};
pub use finalize::{Finalized, PANIC_SUMMARY_MARKER};
pub use panic_capture::PanicReport;

use crate::collector::{Collector, display_line};
use crate::config::ReportConfig;
use crate::error::{BoxError, Result};
use crate::logging::TARGET;
use crate::output::{OutputFormat, SectionSettings, TextFormatter};
use crate::perfdata::{PerfDataSet, PerformanceData};
use crate::state::{STATE_OK_EXIT_CODE, ServiceState};

/// Lifecycle of a [`Plugin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting field changes.
    Configuring,
    /// Severity resolved and report rendered; setters are ignored.
    Finalizing,
    /// Report written; the process is exiting.
    Terminated,
}

pub struct Plugin {
    last_error: Option<BoxError>,
    last_error_line: Option<String>,
    exit_status_code: i32,
    service_output: String,
    long_service_output: String,
    collector: Collector,
    perf_data: PerfDataSet,
    branding: Option<Box<dyn Branding + Send>>,
    sections: SectionSettings,
    allow_empty_service_output: bool,
    output_format: OutputFormat,
    phase: Phase,
    finalized: Option<Finalized>,
}

impl Default for Plugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_error: None,
            last_error_line: None,
            exit_status_code: STATE_OK_EXIT_CODE,
            service_output: String::new(),
            long_service_output: String::new(),
            collector: Collector::new(),
            perf_data: PerfDataSet::new(),
            branding: None,
            sections: SectionSettings::default(),
            allow_empty_service_output: false,
            output_format: OutputFormat::Text,
            phase: Phase::Configuring,
            finalized: None,
        }
    }

    /// Creates a plugin with presentation settings taken from `config`.
    #[must_use]
    pub fn with_config(config: &ReportConfig) -> Self {
        let mut plugin = Self::new();
        plugin.apply_config(config);
        plugin
    }

    /// Copies presentation settings from `config` through the setters.
    pub fn apply_config(&mut self, config: &ReportConfig) {
        let sections = &config.sections;
        if let Some(label) = &sections.errors_label {
            self.set_errors_label(label.clone());
        }
        if let Some(label) = &sections.thresholds_label {
            self.set_thresholds_label(label.clone());
        }
        if let Some(label) = &sections.detailed_info_label {
            self.set_detailed_info_label(label.clone());
        }
        if sections.hide_errors {
            self.hide_errors_section();
        }
        if sections.hide_thresholds {
            self.hide_thresholds_section();
        }
        if config.allow_empty_service_output {
            self.allow_empty_service_output();
        }
        if let Some(text) = &config.branding {
            self.set_branding(StaticBranding(text.clone()));
        }
    }

    // Setters. All of them are ignored once finalization has begun.

    pub fn set_service_output(&mut self, output: impl Into<String>) {
        if self.accepts_changes("service_output") {
            self.service_output = output.into();
        }
    }

    pub fn set_long_service_output(&mut self, output: impl Into<String>) {
        if self.accepts_changes("long_service_output") {
            self.long_service_output = output.into();
        }
    }

    pub fn set_exit_status_code(&mut self, code: i32) {
        if self.accepts_changes("exit_status_code") {
            self.exit_status_code = code;
        }
    }

    pub fn set_state(&mut self, state: ServiceState) {
        self.set_exit_status_code(state.exit_code());
    }

    pub fn set_last_error(&mut self, err: impl Into<BoxError>) {
        if self.accepts_changes("last_error") {
            let err = err.into();
            self.last_error_line = Some(display_line(&err));
            self.last_error = Some(err);
        }
    }

    pub fn add_error(&mut self, err: impl Into<BoxError>) {
        if self.accepts_changes("errors") {
            self.collector.record_error(err);
        }
    }

    pub fn add_threshold(&mut self, desc: impl fmt::Display) {
        if self.accepts_changes("thresholds") {
            self.collector.record_threshold(desc);
        }
    }

    /// Adds a batch of performance metrics.
    ///
    /// # Errors
    /// Returns `InvalidMetric` or `DuplicateMetric`; nothing from the batch
    /// is recorded in that case. Calls after finalization has begun are
    /// ignored and return `Ok`.
    pub fn add_perf_data<I>(&mut self, allow_duplicates: bool, metrics: I) -> Result<()>
    where
        I: IntoIterator<Item = PerformanceData>,
    {
        if !self.accepts_changes("perf_data") {
            return Ok(());
        }
        self.perf_data.add(allow_duplicates, metrics).inspect_err(|e| {
            tracing::debug!(target: TARGET, error = %e, "performance data rejected");
        })
    }

    pub fn set_branding(&mut self, branding: impl Branding + Send + 'static) {
        if self.accepts_changes("branding") {
            self.branding = Some(Box::new(branding));
        }
    }

    pub fn set_errors_label(&mut self, label: impl Into<String>) {
        if self.accepts_changes("errors_label") {
            self.sections.errors_label = Some(label.into());
        }
    }

    pub fn set_thresholds_label(&mut self, label: impl Into<String>) {
        if self.accepts_changes("thresholds_label") {
            self.sections.thresholds_label = Some(label.into());
        }
    }

    pub fn set_detailed_info_label(&mut self, label: impl Into<String>) {
        if self.accepts_changes("detailed_info_label") {
            self.sections.detailed_info_label = Some(label.into());
        }
    }

    pub fn hide_errors_section(&mut self) {
        if self.accepts_changes("hide_errors") {
            self.sections.hide_errors = true;
        }
    }

    pub fn hide_thresholds_section(&mut self) {
        if self.accepts_changes("hide_thresholds") {
            self.sections.hide_thresholds = true;
        }
    }

    pub fn show_errors_section(&mut self) {
        if self.accepts_changes("hide_errors") {
            self.sections.hide_errors = false;
        }
    }

    pub fn show_thresholds_section(&mut self) {
        if self.accepts_changes("hide_thresholds") {
            self.sections.hide_thresholds = false;
        }
    }

    pub fn allow_empty_service_output(&mut self) {
        if self.accepts_changes("allow_empty_service_output") {
            self.allow_empty_service_output = true;
        }
    }

    /// Selects the format written at finalization. Defaults to text.
    pub fn set_output_format(&mut self, format: OutputFormat) {
        if self.accepts_changes("output_format") {
            self.output_format = format;
        }
    }

    // Accessors

    #[must_use]
    pub fn service_output(&self) -> &str {
        &self.service_output
    }

    #[must_use]
    pub fn long_service_output(&self) -> &str {
        &self.long_service_output
    }

    #[must_use]
    pub const fn exit_status_code(&self) -> i32 {
        self.exit_status_code
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn errors(&self) -> &[BoxError] {
        self.collector.errors()
    }

    #[must_use]
    pub fn thresholds(&self) -> &[String] {
        self.collector.thresholds()
    }

    #[must_use]
    pub const fn perf_data(&self) -> &PerfDataSet {
        &self.perf_data
    }

    #[must_use]
    pub const fn sections(&self) -> &SectionSettings {
        &self.sections
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn is_empty_service_output_allowed(&self) -> bool {
        self.allow_empty_service_output
    }

    /// Severity the report would carry right now.
    ///
    /// After finalization this is the resolved state; before it, the state
    /// named by the exit status code, or UNKNOWN for an invalid code.
    #[must_use]
    pub fn state(&self) -> ServiceState {
        self.finalized.as_ref().map_or_else(
            || ServiceState::from_exit_code(self.exit_status_code).unwrap_or(ServiceState::Unknown),
            |f| f.state,
        )
    }

    /// Errors section entries: the last error first, then recorded errors.
    #[must_use]
    pub fn error_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.collector.errors().len() + 1);
        lines.extend(self.last_error_line.iter().cloned());
        lines.extend_from_slice(self.collector.error_lines());
        lines
    }

    #[must_use]
    pub fn threshold_lines(&self) -> Vec<String> {
        self.collector.threshold_lines()
    }

    /// Invokes the branding capability, if any.
    #[must_use]
    pub fn branding_trailer(&self) -> Option<String> {
        self.branding
            .as_ref()
            .map(|b| b.produce_trailer())
            .filter(|t| !t.trim().is_empty())
    }

    /// Renders the text report from the current fields.
    ///
    /// Pure with respect to the plugin: calling it twice without changes in
    /// between yields identical output.
    #[must_use]
    pub fn render(&self) -> String {
        TextFormatter::render(self)
    }

    fn accepts_changes(&self, field: &'static str) -> bool {
        if self.phase == Phase::Configuring {
            return true;
        }
        tracing::warn!(
            target: TARGET,
            field,
            phase = ?self.phase,
            "ignoring change after finalization began"
        );
        false
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("last_error", &self.last_error)
            .field("exit_status_code", &self.exit_status_code)
            .field("service_output", &self.service_output)
            .field("long_service_output", &self.long_service_output)
            .field("collector", &self.collector)
            .field("perf_data", &self.perf_data)
            .field("branding", &self.branding.is_some())
            .field("sections", &self.sections)
            .field("allow_empty_service_output", &self.allow_empty_service_output)
            .field("output_format", &self.output_format)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
