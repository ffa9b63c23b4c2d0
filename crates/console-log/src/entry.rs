use chrono::{DateTime, Local};
use serde::Serialize;

/// Numeric date followed by 24-hour time, e.g. `03/09/24 14:05:07`.
const TIMESTAMP_FORMAT: &str = "%x %X";

/// One displayed line of server output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    text: String,
    timestamp: String,
}

impl LogEntry {
    pub fn new(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Local receipt time, already formatted for display.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Formats a receipt time the way entries display it.
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time formatted as an entry timestamp.
pub fn now_timestamp() -> String {
    format_timestamp(&Local::now())
}
