//! Operator logging for QUADRAX•ML.
//!
//! A [`Logger`] is constructed once at startup from a minimum level, a log
//! directory and a production flag, then shared by `Arc` with everything
//! that needs it. Every emitted entry goes to a colorized console line; in
//! production mode it is also appended as JSON to a per-day file
//! (`<dir>/YYYY-MM-DD.log`).
//!
//! Developer diagnostics still go through `tracing`; this crate is the
//! request/event log an operator reads.

pub mod entry;
pub mod level;
pub mod logger;
pub mod sink;

pub use entry::LogEntry;
pub use level::LogLevel;
pub use logger::{Logger, LoggerConfig};
pub use sink::{ConsoleSink, DailyFileSink, LogSink, MemorySink};

/// Errors from the logging subsystem.
///
/// Sink failures are returned to whoever made the logging call.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("log sink I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
