use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init(verbose: bool) {
    let fallback = if verbose { "logsplit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false)
        .try_init();
}
