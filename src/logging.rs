//! Logging setup.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Log file prefix for the daily rolling appender.
const LOG_FILE_PREFIX: &str = "employee-records.log";

/// Used when `RUST_LOG` is unset or cannot be parsed.
const DEFAULT_DIRECTIVES: &str = "info";

fn env_filter() -> EnvFilter {
    filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Initialize the global subscriber.
///
/// Writes to a daily rolling file when `config.directory` is set and can be
/// created, otherwise to the console. The returned guard must be held for the
/// lifetime of the process so buffered lines are flushed.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    if let Some(dir) = &config.directory {
        match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter())
                    .with_ansi(false)
                    .with_writer(writer)
                    .init();
                tracing::info!("Logging to {}", dir.display());
                return Some(guard);
            }
            Err(e) => {
                tracing_subscriber::fmt().with_env_filter(env_filter()).init();
                tracing::warn!("Cannot create log directory {}: {}, logging to console", dir.display(), e);
                return None;
            }
        }
    }

    tracing_subscriber::fmt().with_env_filter(env_filter()).init();
    None
}
