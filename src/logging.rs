use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

pub const LOG_ENV: &str = "GOENV_LOG";

static INIT: OnceLock<()> = OnceLock::new();

/// Initialize `tracing` output on stderr, filtered by `GOENV_LOG` (default `warn`).
///
/// Stdout is reserved for the status and usage lines.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = Registry::default().with(filter).with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        );
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            // A subscriber is already installed (e.g., tests).
        }
    });
}
