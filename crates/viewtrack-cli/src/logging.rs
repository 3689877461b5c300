//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `VIEWTRACK_LOG=viewtrack_tracker=debug`.
pub const LOG_ENV: &str = "VIEWTRACK_LOG";

/// Installs a stderr subscriber filtered by [`LOG_ENV`], defaulting to `warn`.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
