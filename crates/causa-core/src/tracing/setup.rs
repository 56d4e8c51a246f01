//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the Causa tracing/logging system.
///
/// Reads the `CAUSA_LOG` environment variable for per-crate log levels.
/// Format: `CAUSA_LOG=causa_discovery=debug,causa_effects=warn`
///
/// Falls back to [`DEFAULT_LOG_FILTER`] if `CAUSA_LOG` is not set or is invalid.
/// Logs go to stderr so reports on stdout stay machine-readable.
///
/// Idempotent: calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
