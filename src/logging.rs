//! Tracing setup for embedders and debugging sessions.
//!
//! The library only emits `tracing` events, and the interesting ones are
//! high-frequency: one `trace!` record per emitted tile and per skipped
//! shared-tile copy, so a single drain can produce thousands of lines.
//! The subscriber installed here is shaped for that stream: compact
//! single-line output on stderr, no target column, timing suppressed.
//! Compositors embedding the queue in a larger process should install
//! their own subscriber instead and simply enable the `rasterq` target.

use std::io;

use tracing_subscriber::EnvFilter;

/// Error installing the process-wide subscriber (usually: one is already
/// installed).
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installs a compact stderr subscriber for manual debugging and tests.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. May only
/// succeed once per process.
pub fn init_logging() -> Result<(), InitError> {
    init_with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
}

/// Like [`init_logging`], but with this crate's scheduling decisions
/// turned all the way up: every pop, twin-skip, and dispatch event at
/// `trace` level, everything else at `info`.
pub fn init_scheduling_trace() -> Result<(), InitError> {
    init_with_filter(EnvFilter::new("info,rasterq=trace"))
}

fn init_with_filter(filter: EnvFilter) -> Result<(), InitError> {
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .with_env_filter(filter)
        .try_init()
}
