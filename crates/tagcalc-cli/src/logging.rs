//! Log subscriber setup
//!
//! Logs go to stderr so stdout stays clean for listings and JSON. `RUST_LOG`
//! overrides the level derived from `-q`/`-v`.

use crate::config::Verbosity;
use tracing_subscriber::{fmt, EnvFilter};

/// Builds the filter for `verbosity`, honouring `RUST_LOG` when set
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.log_level()))
}

/// Installs the global subscriber; later calls are no-ops
pub fn init_logging(verbosity: Verbosity) {
    let _ = fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(Verbosity::Debug);
        init_logging(Verbosity::Quiet);
        tracing::debug!("still running");
    }
}
