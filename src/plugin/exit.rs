use std::io;
use std::ops::{Deref, DerefMut};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use super::panic_capture::{self, CaptureScope, PanicReport};
use super::{Finalized, Phase, Plugin};
use crate::error::BoxError;
use crate::logging::TARGET;

/// Set by the first [`terminate`] call in the process.
static REPORT_WRITTEN: AtomicBool = AtomicBool::new(false);

impl Plugin {
    /// Runs `check`, then writes the report and exits the process.
    ///
    /// A panic inside `check` is caught and reported as CRITICAL. This never
    /// returns.
    pub fn run<F>(mut self, check: F) -> !
    where
        F: FnOnce(&mut Self),
    {
        let fault = self.capture(check);
        self.exit_with_report(fault)
    }

    /// Like [`Plugin::run`], for checks that bail out early with `?`.
    ///
    /// An `Err` becomes the last error. If the check had not set a failing
    /// state yet, the report resolves to UNKNOWN.
    pub fn run_fallible<F, E>(self, check: F) -> !
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
        E: Into<BoxError>,
    {
        self.run(|plugin| {
            if let Err(err) = check(plugin) {
                plugin.set_last_error(err);
            }
        })
    }

    /// Runs `check` under the panic boundary and finalizes, without writing
    /// or exiting.
    pub fn evaluate<F>(&mut self, check: F) -> &Finalized
    where
        F: FnOnce(&mut Self),
    {
        let fault = self.capture(check);
        self.finalize(fault)
    }

    /// Wraps the plugin in a guard that finalizes and exits when dropped,
    /// including while unwinding from a panic.
    #[must_use = "dropping the guard immediately writes the report and exits"]
    pub fn guard(self) -> ExitGuard {
        ExitGuard {
            _scope: panic_capture::arm(),
            plugin: self,
        }
    }

    fn capture<F>(&mut self, check: F) -> Option<PanicReport>
    where
        F: FnOnce(&mut Self),
    {
        let _scope = panic_capture::arm();
        panic::catch_unwind(AssertUnwindSafe(|| check(self)))
            .err()
            .map(panic_capture::recover)
    }

    fn exit_with_report(&mut self, fault: Option<PanicReport>) -> ! {
        let finalized = match self.finalized.take() {
            Some(existing) => existing,
            None => self.resolve(fault),
        };
        self.phase = Phase::Terminated;
        terminate(&finalized)
    }
}

/// Writes the report to stdout and exits with its code.
///
/// The only place in the crate that ends the process. A second call anywhere
/// in the process writes nothing and parks the calling thread until the
/// first call's exit takes effect.
pub fn terminate(finalized: &Finalized) -> ! {
    if REPORT_WRITTEN.swap(true, Ordering::SeqCst) {
        tracing::warn!(target: TARGET, "report already written; suppressing second report");
        loop {
            thread::park();
        }
    }

    {
        let mut stdout = io::stdout().lock();
        // Nothing useful can be done if stdout is gone; the exit code still
        // carries the state.
        let _ = finalized.write_to(&mut stdout);
    }

    std::process::exit(finalized.exit_code())
}

/// Scoped finalization: the report is written when the guard goes out of
/// scope, however that happens.
///
/// ```no_run
/// use monitoring_plugin::{Plugin, ServiceState};
///
/// let mut plugin = Plugin::new().guard();
/// plugin.set_service_output("WARNING: 3 of 4 backends reachable");
/// plugin.set_state(ServiceState::Warning);
/// // report written and process exits here
/// ```
pub struct ExitGuard {
    plugin: Plugin,
    _scope: CaptureScope,
}

impl Deref for ExitGuard {
    type Target = Plugin;

    fn deref(&self) -> &Plugin {
        &self.plugin
    }
}

impl DerefMut for ExitGuard {
    fn deref_mut(&mut self) -> &mut Plugin {
        &mut self.plugin
    }
}

impl Drop for ExitGuard {
    fn drop(&mut self) {
        let fault = thread::panicking().then(|| {
            panic_capture::take_captured().unwrap_or_else(|| PanicReport {
                message: String::from("panic payload unavailable"),
                location: None,
                backtrace: String::from("<backtrace not captured>"),
            })
        });
        self.plugin.exit_with_report(fault);
    }
}

#[cfg(test)]
#[path = "exit_tests.rs"]
mod tests;
