//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness so it shows up only for
/// failing tests. Honors `RUST_LOG`; defaults to `debug`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("debug"))
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Parse a decimal, failing with the offending text.
pub fn parse_int(text: &str) -> keel::Result<i64, String> {
    match text.trim().parse::<i64>() {
        Ok(n) => keel::ok(n),
        Err(_) => keel::err(format!("not a number: {text:?}")),
    }
}
