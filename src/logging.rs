//! Log output setup for the `dope` binary
//!
//! Logs go to stderr so listings on stdout stay clean. `RUST_LOG`
//! overrides the level chosen here.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber; `debug` lowers the default level from
/// `warn` to `debug`
pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .ok();
}
