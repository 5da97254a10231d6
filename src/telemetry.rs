//! Logging initialization.
//!
//! tracing-subscriber with an EnvFilter. RUST_LOG wins when set;
//! otherwise the configured LOG_LEVEL applies.

use crate::error::{Error, Result};

/// Map a configured level name to a tracing Level. Unrecognized names
/// fall back to INFO instead of being fed to the filter as a target
/// directive, which would silently drop all output.
pub fn parse_level(name: &str) -> tracing::Level {
    name.trim().parse().unwrap_or(tracing::Level::INFO)
}

pub fn init_logging(default_level: &str) -> Result<()> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(parse_level(default_level).to_string()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| Error::Config(format!("failed to init tracing subscriber: {e}")))
}
