use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use super::panic_capture;
use super::{PanicReport, Phase, Plugin};
use crate::collector::single_line;
use crate::error::PluginError;
use crate::logging::TARGET;
use crate::output::{EMPTY_SERVICE_OUTPUT_SENTINEL, OutputFormat, TextFormatter};
use crate::state::ServiceState;

/// Marker placed in the summary when the check panicked.
pub const PANIC_SUMMARY_MARKER: &str = "plugin crash/panic";

/// The resolved outcome of a run: what gets written and how the process
/// exits.
#[derive(Debug)]
pub struct Finalized {
    pub state: ServiceState,
    pub output: String,
    /// Misuse detected while resolving, already corrected in `state`.
    pub diagnostics: Vec<PluginError>,
    pub panicked: bool,
}

impl Finalized {
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.state.exit_code()
    }

    /// Writes the report unbuffered and flushes.
    ///
    /// # Errors
    /// Returns the underlying write error.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(self.output.as_bytes())?;
        w.flush()
    }
}

impl Plugin {
    /// Resolves severity and renders the report.
    ///
    /// The first call moves the plugin out of [`Phase::Configuring`]; from
    /// then on setters are ignored. Later calls return the same report and
    /// ignore `fault`: the severity is never re-derived.
    pub fn finalize(&mut self, fault: Option<PanicReport>) -> &Finalized {
        let finalized = match self.finalized.take() {
            Some(existing) => {
                tracing::warn!(target: TARGET, "plugin already finalized; reusing report");
                existing
            }
            None => self.resolve(fault),
        };
        self.finalized.insert(finalized)
    }

    /// The resolved report, once [`Plugin::finalize`] has run.
    #[must_use]
    pub const fn finalized(&self) -> Option<&Finalized> {
        self.finalized.as_ref()
    }

    pub(super) fn resolve(&mut self, fault: Option<PanicReport>) -> Finalized {
        self.phase = Phase::Finalizing;
        let mut diagnostics = Vec::new();
        let mut panicked = fault.is_some();

        let mut state = if let Some(fault) = fault {
            self.apply_fault(&fault);
            ServiceState::Critical
        } else {
            self.check_service_output(&mut diagnostics);
            self.resolve_state(&mut diagnostics)
        };
        self.exit_status_code = state.exit_code();

        for diagnostic in &diagnostics {
            tracing::warn!(
                target: TARGET,
                kind = diagnostic.error_type(),
                "{diagnostic}"
            );
        }

        let output = match self.render_guarded() {
            Ok(output) => output,
            Err(fault) => {
                // Branding is the only caller code left in rendering.
                self.branding = None;
                self.apply_fault(&fault);
                state = ServiceState::Critical;
                self.exit_status_code = state.exit_code();
                panicked = true;
                self.render_output()
            }
        };
        tracing::debug!(
            target: TARGET,
            state = %state,
            panicked,
            bytes = output.len(),
            "plugin finalized"
        );

        Finalized {
            state,
            output,
            diagnostics,
            panicked,
        }
    }

    /// Renders under its own panic boundary, since the branding capability
    /// runs here.
    ///
    /// While the thread is already unwinding a second panic would abort the
    /// process, so branding is dropped instead of called.
    fn render_guarded(&mut self) -> Result<String, PanicReport> {
        if thread::panicking() {
            if self.branding.take().is_some() {
                tracing::warn!(target: TARGET, "branding skipped while unwinding");
            }
            return Ok(self.render_output());
        }

        let _scope = panic_capture::arm();
        panic::catch_unwind(AssertUnwindSafe(|| self.render_output()))
            .map_err(panic_capture::recover)
    }

    fn apply_fault(&mut self, fault: &PanicReport) {
        tracing::warn!(target: TARGET, message = %fault.message, "check panicked");

        self.service_output = format!(
            "{}: {PANIC_SUMMARY_MARKER}: {}",
            ServiceState::Critical.label(),
            single_line(&fault.message)
        );

        let mut detail = self.long_service_output.trim_end().to_string();
        if !detail.is_empty() {
            detail.push_str("\n\n");
        }
        if let Some(location) = &fault.location {
            detail.push_str("Panic location: ");
            detail.push_str(location);
            detail.push_str("\n\n");
        }
        detail.push_str("Stacktrace:\n\n");
        detail.push_str(&fault.backtrace);
        self.long_service_output = detail;
    }

    fn check_service_output(&mut self, diagnostics: &mut Vec<PluginError>) {
        if !self.service_output.trim().is_empty() || self.allow_empty_service_output {
            return;
        }
        self.collector.record_error(PluginError::EmptyServiceOutput);
        diagnostics.push(PluginError::EmptyServiceOutput);
    }

    fn resolve_state(&mut self, diagnostics: &mut Vec<PluginError>) -> ServiceState {
        let code = self.exit_status_code;
        let Some(state) = ServiceState::from_exit_code(code) else {
            diagnostics.push(PluginError::InvalidExitCode(code));
            return self.correct_to_unknown();
        };

        if state == ServiceState::Ok {
            if let Some(error) = &self.last_error_line {
                diagnostics.push(PluginError::MisconfiguredExitCode {
                    code,
                    label: state.label(),
                    error: error.clone(),
                });
                return self.correct_to_unknown();
            }
        }

        state
    }

    fn correct_to_unknown(&mut self) -> ServiceState {
        self.service_output = relabel_summary(&self.service_output, ServiceState::Unknown);
        ServiceState::Unknown
    }

    fn render_output(&self) -> String {
        match self.output_format {
            OutputFormat::Text => TextFormatter::render(self),
            format => format.formatter().format(self).unwrap_or_else(|e| {
                tracing::warn!(target: TARGET, error = %e, "falling back to text output");
                TextFormatter::render(self)
            }),
        }
    }
}

/// Replaces a leading `<STATE>:` in `summary` with `state`'s label, or
/// prefixes it when there is none.
pub(crate) fn relabel_summary(summary: &str, state: ServiceState) -> String {
    let trimmed = summary.trim_start();
    let rest = ServiceState::ALL
        .iter()
        .find_map(|s| trimmed.strip_prefix(s.label())?.strip_prefix(':'))
        .map_or(trimmed, str::trim_start);

    if rest.trim().is_empty() {
        format!("{}: {EMPTY_SERVICE_OUTPUT_SENTINEL}", state.label())
    } else {
        format!("{}: {rest}", state.label())
    }
}

#[cfg(test)]
#[path = "finalize_tests.rs"]
mod tests;
