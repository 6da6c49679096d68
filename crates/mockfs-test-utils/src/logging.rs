use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Install a tracing subscriber that writes through the test harness.
///
/// Reads `RUST_LOG`, defaulting to "info". Safe to call from every test;
/// only the first call installs anything.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_test_writer()
            .compact();

        // Another crate in the same binary may have installed one already.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init();
    });
}
