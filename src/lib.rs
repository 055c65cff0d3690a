//! Result assembly and exit coordination for Nagios-compatible monitoring
//! plugins.
//!
//! A check fills a [`Plugin`] with a summary, performance metrics, errors,
//! threshold descriptions and detailed output, then hands it to
//! [`Plugin::run`] (or an [`ExitGuard`]). Exactly one report is written to
//! stdout and the process exits with the matching state code, even if the
//! check panics.
//!
//! ```no_run
//! use monitoring_plugin::{Plugin, PerformanceData, ServiceState};
//!
//! Plugin::new().run_fallible(|plugin| {
//!     plugin.add_perf_data(false, [PerformanceData::new("time", "42ms").with_warn("100")])?;
//!     plugin.set_service_output("OK: responded in 42ms");
//!     plugin.set_state(ServiceState::Ok);
//!     Ok::<_, monitoring_plugin::PluginError>(())
//! });
//! ```

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod perfdata;
pub mod plugin;
pub mod state;

pub use config::{ConfigLoader, FileConfigLoader, ReportConfig};
pub use error::{BoxError, PluginError, Result};
pub use output::{CHECK_OUTPUT_EOL, OutputFormat};
pub use perfdata::{PerfDataSet, PerformanceData, Range, UnitOfMeasurement};
pub use plugin::{Branding, ExitGuard, Finalized, PanicReport, Phase, Plugin};
pub use state::ServiceState;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
