use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

/// Default filter directive when `RUST_LOG` is not set.
pub fn default_directive(verbosity: Verbosity, configured_level: Option<&str>) -> String {
    match verbosity {
        Verbosity::Verbose => "elex=debug".to_string(),
        Verbosity::Quiet => "elex=error".to_string(),
        Verbosity::Normal => format!("elex={}", configured_level.unwrap_or("warn")),
    }
}

/// Logs go to stderr so they never mix with the rendered CSV/JSON on stdout.
pub fn init_cli_logger(verbosity: Verbosity, configured_level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity, configured_level)));

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

/// Machine-readable variant for log collectors.
pub fn init_json_logger(verbosity: Verbosity, configured_level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity, configured_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .json(),
        )
        .try_init();
}
