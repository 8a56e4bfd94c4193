//! One-time tracing setup for test binaries.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once per process; later calls are no-ops.
///
/// Filter comes from `TEST_LOG`, then `RUST_LOG`, defaulting to `warn`.
/// `TEST_LOG_JSON=1` switches to the JSON layout used in production.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let json = matches!(std::env::var("TEST_LOG_JSON").as_deref(), Ok("1" | "true"));
        let builder = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time();

        // try_init: something else may already own the global subscriber
        let _ = if json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
    });
}
