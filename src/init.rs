//! Initialization that needs to be done on startup

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "resize_once=info";

/// Sets up logging to stderr, keeping stdout for the result line.
/// `RUST_LOG` replaces the default filter.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    // a second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
