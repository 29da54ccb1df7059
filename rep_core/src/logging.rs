//! Tracing setup shared by the Repcount binaries.
//!
//! The engine itself only emits events; hosts decide whether to install a
//! subscriber.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a compact subscriber at INFO, overridable with RUST_LOG
pub fn init() {
    init_with_level("info")
}

/// Install a compact subscriber with the given default level
///
/// `RUST_LOG` still wins when set.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Default level for a `-v` count: 0 → warn, 1 → info, 2 → debug, more → trace
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
