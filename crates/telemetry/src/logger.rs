//! The operator logger service.

use crate::LogError;
use crate::entry::LogEntry;
use crate::level::LogLevel;
use crate::sink::{ConsoleSink, DailyFileSink, LogSink};
use std::path::PathBuf;

/// Startup settings for a [`Logger`]. Fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level that gets emitted
    pub level: LogLevel,
    /// Directory for the daily files
    pub dir: PathBuf,
    /// Append entries to the daily file as well as the console
    pub production: bool,
}

impl LoggerConfig {
    /// Build from a level *name*; unknown or empty names mean `Info`.
    pub fn new(level_name: &str, dir: impl Into<PathBuf>, production: bool) -> Self {
        Self {
            level: LogLevel::from_name_or_default(level_name),
            dir: dir.into(),
            production,
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            dir: PathBuf::from("logs"),
            production: false,
        }
    }
}

/// Leveled logger fanning out to a set of sinks.
///
/// Construct one at startup and share it by `Arc`.
pub struct Logger {
    level: LogLevel,
    sinks: Vec<Box<dyn LogSink>>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("sink_count", &self.sinks.len())
            .finish()
    }
}

impl Logger {
    /// Console sink always; daily file sink in production mode.
    pub fn new(config: LoggerConfig) -> Self {
        let mut sinks: Vec<Box<dyn LogSink>> = vec![Box::new(ConsoleSink)];
        if config.production {
            sinks.push(Box::new(DailyFileSink::new(config.dir)));
        }
        Self::with_sinks(config.level, sinks)
    }

    /// Create a logger with an explicit set of sinks.
    pub fn with_sinks(level: LogLevel, sinks: Vec<Box<dyn LogSink>>) -> Self {
        Self { level, sinks }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.level.allows(level)
    }

    /// Emit an entry to every sink unless `level` is filtered out.
    ///
    /// Every sink is attempted; the first failure is returned.
    pub fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        meta: Option<serde_json::Value>,
    ) -> Result<(), LogError> {
        if !self.enabled(level) {
            return Ok(());
        }

        let entry = LogEntry::new(level, message, meta);
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.write(&entry) {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn error(
        &self,
        message: impl Into<String>,
        meta: Option<serde_json::Value>,
    ) -> Result<(), LogError> {
        self.log(LogLevel::Error, message, meta)
    }

    pub fn warn(
        &self,
        message: impl Into<String>,
        meta: Option<serde_json::Value>,
    ) -> Result<(), LogError> {
        self.log(LogLevel::Warn, message, meta)
    }

    pub fn info(
        &self,
        message: impl Into<String>,
        meta: Option<serde_json::Value>,
    ) -> Result<(), LogError> {
        self.log(LogLevel::Info, message, meta)
    }

    pub fn debug(
        &self,
        message: impl Into<String>,
        meta: Option<serde_json::Value>,
    ) -> Result<(), LogError> {
        self.log(LogLevel::Debug, message, meta)
    }
}
