//! Tracing setup.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber. Safe to call more than once
/// (tests call it from multiple entry points); later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
