use std::sync::OnceLock;

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::PROGRAM_LOG_LEVEL;

/// Diagnostic logger writing to stderr so that stdout stays reserved for
/// the per-item report lines.
pub struct Logger {
    level: Level,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            eprintln!(
                "{} {} [{}] {}",
                timestamp,
                record.level(),
                short_target(record.target()),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// `reap_engine::pipeline` -> `engine::pipeline`
fn short_target(target: &str) -> &str {
    target.strip_prefix("reap_").unwrap_or(target)
}

fn parse_level(raw: Option<&str>) -> Option<Level> {
    raw.and_then(|s| s.parse::<LevelFilter>().ok())
        .and_then(|filter| filter.to_level())
}

/// Level requested through `REAP_LOG_LEVEL`, warn when unset or invalid.
pub fn get_level_from_env() -> Level {
    let raw = std::env::var(PROGRAM_LOG_LEVEL).ok();
    parse_level(raw.as_deref()).unwrap_or(Level::Warn)
}

/// Install the logger using `REAP_LOG_LEVEL` (default: warn).
pub fn init() -> Result<(), SetLoggerError> {
    init_with_level(get_level_from_env())
}

/// Install the logger with an explicit level. Later calls are no-ops.
pub fn init_with_level(level: Level) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    let init_call = LOGGER.get().is_none();
    let logger = LOGGER.get_or_init(|| Logger { level });

    if init_call {
        log::set_logger(logger)?;
        log::set_max_level(logger.level.to_level_filter());
    }

    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
