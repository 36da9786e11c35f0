//! Logging facility
//!
//! A minimal `log` backend writing `[LEVEL] message` lines to stderr.
//! Only the binary installs it; library code just uses the `log` macros.

use log::{LevelFilter, Log, Metadata, Record};

pub static LOGGER: Logger = Logger;

pub struct Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the stderr logger with the given maximum level.
///
/// Fails if another logger was installed first.
pub fn init(level: LevelFilter) -> Result<(), String> {
    log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(level))
        .map_err(|e| format!("Logger initialization failed: {}", e))
}
