//! Logging setup for the command-line front end.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Build the filter from `RUST_LOG`, or `verbose`/default when it is unset.
pub fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { DEFAULT_DIRECTIVE };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global fmt subscriber, writing to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
