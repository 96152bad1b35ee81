//! Shared fixtures for chrona's end-to-end scenario tests.

pub mod actions;
pub mod register;

/// Install a fmt subscriber honouring `RUST_LOG`, once per process.
///
/// Repeated calls are fine; only the first wins.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
