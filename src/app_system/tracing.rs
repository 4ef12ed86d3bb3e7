/// Configures the global tracing subscriber.
///
/// `RUST_LOG` controls verbosity and defaults to `info`:
/// ```bash
/// RUST_LOG=debug stock_refresher                       # per-product updates
/// RUST_LOG=stock_refresher::store=debug stock_refresher # store calls only
/// ```
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
