//! Logging initialization and configuration.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the binary (or to a test suite that wants to see them).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "aurornis=info";

fn filter_for(level: Option<&str>) -> EnvFilter {
    match level {
        // Full directives (`aurornis=debug,tokio=warn`) are used as given
        Some(level) if level.contains('=') => {
            EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
        Some(level) => EnvFilter::try_new(format!("aurornis={level}"))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Initialize the logging system.
///
/// Uses the `RUST_LOG` environment variable for filtering. If not set,
/// defaults to `aurornis=info`. Logs go to stderr so they never mix with
/// a captured result printed on stdout.
///
/// # Panics
///
/// Panics if called more than once, or if another tracing subscriber
/// has already been set.
pub fn init() {
    tracing_subscriber::registry()
        .with(filter_for(None))
        .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Try to initialize the logging system.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init() -> Result<(), tracing_subscriber::util::TryInitError> {
    init_with_level(None)
}

/// Try to initialize the logging system with an explicit level
/// (error, warn, info, debug, trace). `None` falls back to `RUST_LOG`.
pub fn init_with_level(level: Option<&str>) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_idempotent() {
        // First call may or may not succeed depending on test order
        let _ = try_init();
        let _ = try_init();
    }

    #[test]
    fn test_init_with_level() {
        let _ = init_with_level(Some("debug"));

        tracing::debug!("test debug message");
        tracing::info!("test info message");
    }

    #[test]
    fn test_invalid_level_falls_back() {
        // Must not panic on a garbage level string
        let _ = filter_for(Some("[[not a level"));
    }
}
