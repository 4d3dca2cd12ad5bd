//! Log sinks: where entries are written.

use crate::LogError;
use crate::entry::LogEntry;
use crate::level::LogLevel;
use console::{Term, style};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Trait for log sinks.
pub trait LogSink: Send + Sync {
    fn write(&self, entry: &LogEntry) -> Result<(), LogError>;
}

/// Writes one colorized line per entry. Errors and warnings go to stderr,
/// everything else to stdout. Colors are dropped when the stream is not a
/// terminal.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn format(entry: &LogEntry) -> String {
        let level = match entry.level {
            LogLevel::Error => style(format!("{:<5}", entry.level)).red().bold(),
            LogLevel::Warn => style(format!("{:<5}", entry.level)).yellow().bold(),
            LogLevel::Info => style(format!("{:<5}", entry.level)).cyan(),
            LogLevel::Debug => style(format!("{:<5}", entry.level)).magenta(),
        };
        let timestamp = style(entry.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)).dim();

        match &entry.meta {
            Some(meta) => format!("[{timestamp}] {level} {} {meta}", entry.message),
            None => format!("[{timestamp}] {level} {}", entry.message),
        }
    }
}

impl LogSink for ConsoleSink {
    fn write(&self, entry: &LogEntry) -> Result<(), LogError> {
        let term = match entry.level {
            LogLevel::Error | LogLevel::Warn => Term::stderr(),
            LogLevel::Info | LogLevel::Debug => Term::stdout(),
        };
        term.write_line(&Self::format(entry))?;
        Ok(())
    }
}

/// Appends JSON lines to `<dir>/YYYY-MM-DD.log`, one file per UTC day.
///
/// No locking: each entry is a single `write_all` on a file opened in
/// append mode, so concurrent writers interleave at line granularity.
/// Files are never rotated or truncated here.
#[derive(Debug, Clone)]
pub struct DailyFileSink {
    dir: PathBuf,
}

impl DailyFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the log directory if missing. Safe to call repeatedly and
    /// from several threads at once.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// Path of the file `entry` is appended to.
    pub fn path_for(&self, entry: &LogEntry) -> PathBuf {
        self.dir.join(entry.file_name())
    }
}

impl LogSink for DailyFileSink {
    fn write(&self, entry: &LogEntry) -> Result<(), LogError> {
        self.ensure_dir()?;

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(entry))?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Keeps entries in memory. Useful for tests and for inspecting what a
/// component logged.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    entries: std::sync::Arc<Mutex<Vec<LogEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn count(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl LogSink for MemorySink {
    fn write(&self, entry: &LogEntry) -> Result<(), LogError> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry.clone());
        Ok(())
    }
}
