use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber for the command line tool.
///
/// Output goes to stderr so JSON on stdout stays clean. `RUST_LOG` overrides
/// the default filter; `verbose` raises this crate to `debug`.
pub fn init_cli_logger(verbose: bool) {
    let default_filter = if verbose {
        "car_loan_calculator=debug,car_loan=debug,warn"
    } else {
        "car_loan_calculator=warn,car_loan=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
