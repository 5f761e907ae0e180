//! Tracing setup: console output plus an optional daily log file.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

pub const LOG_FILE_PREFIX: &str = "erp-dashboard.log";

/// Filter from `RUST_LOG`, falling back to the configured level.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config))
}

fn default_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_new(config.level.to_lowercase()).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held
/// until the application exits.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let (file_layer, guard) = if config.file_enabled {
        let dir = config.resolved_directory();
        match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer().with_writer(writer).with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("Failed to create log directory {}: {}", dir.display(), e);
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt::layer())
        .with(file_layer)
        .init();

    if let Some(dir) = guard.as_ref().map(|_| config.resolved_directory()) {
        tracing::info!("Logging to {}", dir.display());
    }
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_filter_uses_level() {
        assert_eq!(default_filter(&config("DEBUG")).to_string(), "debug");
    }
}
