//! A single log record.

use crate::level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One log line. Serialized as `{timestamp, level, message, meta?}` in the
/// daily file; never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>, meta: Option<serde_json::Value>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            meta,
        }
    }

    /// Name of the day file this entry belongs to, by UTC date.
    pub fn file_name(&self) -> String {
        format!("{}.log", self.timestamp.format("%Y-%m-%d"))
    }
}
