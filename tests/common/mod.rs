//! Shared setup for the integration tests.

/// Routes tracing output through the test harness. Only the first call
/// installs the subscriber; the rest are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
