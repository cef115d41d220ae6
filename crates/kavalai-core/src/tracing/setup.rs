//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the Kavalai tracing/logging system.
///
/// Reads the `KAVALAI_LOG` environment variable for per-crate log levels.
/// Format: `KAVALAI_LOG=kavalai_analysis=debug,kavalai_core=warn`
///
/// Falls back to info level for both crates if `KAVALAI_LOG` is not set or
/// is invalid. Calling it more than once is a no-op, and so is calling it
/// after the host application installed its own global subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = env_filter();
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

/// The filter `init_tracing` installs: `KAVALAI_LOG` when it parses,
/// otherwise the default per-crate `info` filter.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
