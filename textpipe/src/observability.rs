//! Logging setup for hosts and tests.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber from `RUST_LOG`.
///
/// Falls back to `info` when no filter is configured. Safe to call more
/// than once; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_reentrant() {
        init();
        init();
    }
}
