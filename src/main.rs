use clap::Parser;

use monitoring_plugin::cli::Cli;
use monitoring_plugin::logging;
use monitoring_plugin::{Plugin, ServiceState};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => report_usage_error(&e),
    };

    logging::init_tracing(cli.verbose);

    if cli.guard {
        run_guarded(&cli);
    } else {
        Plugin::new().run_fallible(|plugin| cli.apply(plugin));
    }
}

/// Same report as the closure form, written when the guard goes out of
/// scope. A panic in `apply` is reported while unwinding.
fn run_guarded(cli: &Cli) {
    let mut plugin = Plugin::new().guard();
    if let Err(err) = cli.apply(&mut plugin) {
        plugin.set_last_error(err);
    }
}

/// Turns a command line error into an UNKNOWN report instead of clap's exit
/// code 2, which the monitoring core would read as CRITICAL.
fn report_usage_error(err: &clap::Error) -> ! {
    logging::init_tracing(0);

    let rendered = err.to_string();
    let reason = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error:")
        .trim()
        .to_string();

    Plugin::new().run(|plugin| {
        plugin.set_service_output("UNKNOWN: invalid command line arguments");
        plugin.set_state(ServiceState::Unknown);
        plugin.set_last_error(reason);
        plugin.set_long_service_output(rendered);
    })
}
