//! Process-wide tracing setup for the console shell.
//!
//! The shell runs on a developer's or clinician's machine, so the default
//! output is a compact human-readable format rather than JSON; `RUST_LOG`
//! overrides the filter as usual.

use tracing_subscriber::EnvFilter;

/// Initialize tracing with the default `info` filter.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    init_with_filter("info");
}

/// Initialize tracing with an explicit fallback filter directive, used when
/// `RUST_LOG` is not set (tests pass `debug` here).
pub fn init_with_filter(directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(true)
        .try_init();
}
