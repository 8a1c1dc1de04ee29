//! Tracing setup for the binary
//!
//! Logs go to stderr; stdout carries only the CSV report.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Build the filter: `RUST_LOG` if set, otherwise `budget_ledger=<level>`
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("budget_ledger={}", default_level)))
        .unwrap_or_else(|_| EnvFilter::new("budget_ledger=warn"))
}

/// Install the global subscriber; later calls are no-ops
pub fn init_tracing(default_level: &str) {
    TRACING_INIT.call_once(|| {
        let filter = env_filter(default_level);

        // Another subscriber may already be installed (e.g. by a test harness)
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
