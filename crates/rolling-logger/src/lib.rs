//! Rolling Logger
//!
//! A `log::Log` implementation that keeps the most recent records in a
//! circular buffer and forwards every record to the browser console
//! (or stderr when not running on wasm32).

use std::collections::VecDeque;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Logger with a bounded buffer of formatted records
pub struct RollingLogger {
    level: LevelFilter,
    capacity: usize,
    buffer: Mutex<VecDeque<String>>,
}

impl RollingLogger {
    pub fn new(capacity: usize, level: LevelFilter) -> Self {
        Self {
            level,
            capacity: capacity.max(1),
            buffer: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    /// Snapshot of retained records, oldest first
    pub fn recent(&self) -> Vec<String> {
        match self.buffer.lock() {
            Ok(buffer) => buffer.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Retained records as one newline-separated block
    pub fn dump(&self) -> String {
        self.recent().join("\n")
    }

    fn push(&self, line: String) {
        if let Ok(mut buffer) = self.buffer.lock() {
            if buffer.len() == self.capacity {
                buffer.pop_front();
            }
            buffer.push_back(line);
        }
    }
}

/// Format a record as a single line: `HH:MM:SS.mmm LEVEL message`
pub fn format_record(level: Level, args: &std::fmt::Arguments<'_>) -> String {
    let now = chrono::Utc::now().format("%H:%M:%S%.3f");
    format!("{} {:<5} {}", now, level, args)
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record.level(), record.args());
        emit(record.level(), &line);
        self.push(line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    match level {
        Level::Error => web_sys::console::error_1(&line.into()),
        Level::Warn => web_sys::console::warn_1(&line.into()),
        Level::Info => web_sys::console::info_1(&line.into()),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&line.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the logger globally. The instance is leaked so the returned
/// reference stays valid for the lifetime of the page.
pub fn init(capacity: usize, level: LevelFilter) -> Result<&'static RollingLogger, SetLoggerError> {
    let logger: &'static RollingLogger = Box::leak(Box::new(RollingLogger::new(capacity, level)));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_line(logger: &RollingLogger, level: Level, msg: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .args(format_args!("{}", msg))
                .build(),
        );
    }

    #[test]
    fn test_buffer_drops_oldest_when_full() {
        let logger = RollingLogger::new(2, LevelFilter::Info);
        record_line(&logger, Level::Info, "one");
        record_line(&logger, Level::Info, "two");
        record_line(&logger, Level::Info, "three");

        let recent = logger.recent();
        assert_eq!(recent.len(), 2);
        assert!(recent[0].ends_with("two"));
        assert!(recent[1].ends_with("three"));
    }

    #[test]
    fn test_records_below_level_are_ignored() {
        let logger = RollingLogger::new(8, LevelFilter::Warn);
        record_line(&logger, Level::Info, "quiet");
        record_line(&logger, Level::Error, "loud");

        let recent = logger.recent();
        assert_eq!(recent.len(), 1);
        assert!(recent[0].contains("ERROR"));
    }

    #[test]
    fn test_dump_joins_oldest_first() {
        let logger = RollingLogger::new(4, LevelFilter::Info);
        assert_eq!(logger.dump(), "");
        record_line(&logger, Level::Info, "first");
        record_line(&logger, Level::Warn, "second");

        let dump = logger.dump();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("first"));
        assert!(lines[1].contains("WARN"));
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let logger = RollingLogger::new(0, LevelFilter::Trace);
        record_line(&logger, Level::Debug, "a");
        record_line(&logger, Level::Debug, "b");
        assert_eq!(logger.recent().len(), 1);
    }
}
