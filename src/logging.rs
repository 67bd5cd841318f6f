use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `TAXIPARK_LOG=taxipark=debug`.
pub const LOG_ENV: &str = "TAXIPARK_LOG";

/// Installs the global subscriber. Falls back to `taxipark=info` when
/// `TAXIPARK_LOG` is unset or unparsable. Later calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("taxipark=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
