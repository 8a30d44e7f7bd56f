//! Logging setup for the `arbor` binary.

use arbor_foundation::{Error, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Level used when neither `--log-level` nor `RUST_LOG` is given.
pub const DEFAULT_LEVEL: &str = "warn";

/// Builds the stderr filter.
///
/// An explicit `log_level` wins; otherwise `RUST_LOG` is used, falling back
/// to [`DEFAULT_LEVEL`].
#[must_use]
pub fn env_filter(log_level: Option<&str>) -> EnvFilter {
    match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
    }
}

/// Installs a stderr `fmt` subscriber as the global default.
///
/// # Errors
///
/// Returns an internal error if a global subscriber is already set.
pub fn init_logger(log_level: Option<&str>, no_color: bool) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_filter(env_filter(log_level));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .try_init()
        .map_err(|e| Error::internal(format!("failed to install logger: {e}")))
}
