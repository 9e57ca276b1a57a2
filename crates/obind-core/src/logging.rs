#![forbid(unsafe_code)]

//! Logging integration.
//!
//! With the `tracing` feature the usual macros are re-exported here so
//! downstream crates can log without naming `tracing` directly. With
//! `tracing-json` a JSON subscriber can be installed for production logs.
//!
//! Without either feature this module is empty and logging compiles away.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, warn};

/// Environment variable consulted for the log filter.
pub const LOG_FILTER_ENV: &str = "OBIND_LOG";

/// Default filter when [`LOG_FILTER_ENV`] is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install a global JSON subscriber filtered by `OBIND_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init()
        .is_ok()
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_already_installed() {
        let _ = init_json_logging();
        assert!(!init_json_logging());
    }
}
