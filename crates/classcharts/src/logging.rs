use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initializes console logging on stderr.
///
/// Reports are written to stdout, so diagnostics must stay on stderr.
///
/// # Configuration
///
/// - `RUST_LOG` wins when set.
/// - Otherwise `LOG_LEVEL` sets the level for this crate (default: `warn`,
///   or `debug` when `verbose` is set).
/// - HTTP internals are held at `warn`.
pub fn init_console_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| default_level.to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={},reqwest=warn,hyper=warn,hyper_util=warn",
            env!("CARGO_CRATE_NAME"),
            log_level
        ))
    });

    let console_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_ansi(true)
        .with_filter(env_filter);

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
