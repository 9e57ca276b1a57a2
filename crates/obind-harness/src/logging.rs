#![forbid(unsafe_code)]

//! Test logging setup.

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber filtered by `OBIND_LOG` (default `warn`).
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_env("OBIND_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
