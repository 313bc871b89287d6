//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Filter used when `VAULTSENSE_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str =
    "vaultsense_core=info,vaultsense_storage=info,vaultsense_embeddings=info,vaultsense_retrieval=info";

/// Initialize logging.
///
/// Reads `VAULTSENSE_LOG` for per-crate log levels, e.g.
/// `VAULTSENSE_LOG=vaultsense_storage=debug,vaultsense_retrieval=info`.
/// Output goes to stderr; stdout is reserved for the protocol layer.
///
/// Idempotent: calling it more than once is safe, and it does not panic
/// if another subscriber was installed first.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
