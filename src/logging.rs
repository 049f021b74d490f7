//! Tracing subscriber setup driven by [`AppConfig::log_level`].

use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::AppConfig;

/// Map a config level string to a filter, INFO when unrecognised
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::INFO)
}

/// Install the global subscriber. Returns false if one was already set.
pub fn init_logging(level: LevelFilter) -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true),
        )
        .with(level)
        .try_init()
        .is_ok()
}

pub fn init_from_config(config: &AppConfig) -> bool {
    let level = parse_level(&config.log_level);
    let installed = init_logging(level);
    if installed {
        tracing::info!("Logging initialized at {}", level);
    }
    installed
}
