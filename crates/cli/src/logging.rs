use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. `RUST_LOG` applies unless `verbose` forces `debug`;
/// the fallback level is `warn` so listings stay readable.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
