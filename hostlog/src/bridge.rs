use std::sync::Arc;

use hostlog_core::{Level, LogError, Method, Record, Result};
use log::{LevelFilter, Log};

use crate::Logger;

/// Routes `log` crate macros into a [`Logger`].
struct LogBridge {
    logger: Arc<Logger>,
}

fn map_level(level: log::Level) -> (Level, Method) {
    match level {
        log::Level::Error => (Level::Error, Method::Error),
        log::Level::Warn => (Level::Warning, Method::Warning),
        log::Level::Info => (Level::Info, Method::Info),
        log::Level::Debug => (Level::Debug, Method::Debug),
        log::Level::Trace => (Level::Debug, Method::Log),
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.logger.is_enabled_for(map_level(metadata.level()).0)
    }

    fn log(&self, record: &log::Record) {
        let (level, method) = map_level(record.level());
        if !self.logger.is_enabled_for(level) {
            return;
        }
        let record = Record::new(self.logger.name(), level, method, record.args());
        // `Log::log` has no way to report a failed sink.
        self.logger.handle(&record).ok();
    }

    fn flush(&self) {
        self.logger.flush().ok();
    }
}

/// Installs `logger` as the global `log` backend, so `log::info!` and friends
/// reach its sinks. Threshold filtering stays with the logger.
pub fn init_log_bridge(logger: Arc<Logger>) -> Result<()> {
    log::set_boxed_logger(Box::new(LogBridge { logger }))
        .map_err(|_| LogError::LoggerAlreadySet)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
