//! Shared helpers for flagbind integration tests.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

static TRACING: Once = Once::new();

/// Route tracing output through the test harness. Honors `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
