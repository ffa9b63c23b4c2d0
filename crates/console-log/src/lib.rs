//! Log state for the relay console.
//!
//! Holds the ordered, append-only list of lines received from the server
//! and notifies views when new lines arrive. All methods are synchronous.

mod entry;
mod sequence;

pub use entry::{LogEntry, format_timestamp, now_timestamp};
pub use sequence::{LogNotification, LogSequence};
