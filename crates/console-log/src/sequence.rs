use tokio::sync::broadcast;

use crate::entry::LogEntry;

/// Queue depth for view notifications before slow subscribers lag.
const NOTIFY_CAPACITY: usize = 256;

/// Change notifications delivered to views of a [`LogSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogNotification {
    /// `count` entries were appended starting at `first_index`.
    Appended { first_index: usize, count: usize },
    /// The view should scroll to show the most recent entry.
    ScrollToLatest,
}

/// Append-only, ordered log of received lines.
///
/// Insertion order is display order. Entries are never reordered,
/// deduplicated or evicted.
#[derive(Debug)]
pub struct LogSequence {
    entries: Vec<LogEntry>,
    notify_tx: broadcast::Sender<LogNotification>,
}

impl LogSequence {
    pub fn new() -> Self {
        let (notify_tx, _) = broadcast::channel(NOTIFY_CAPACITY);
        Self {
            entries: Vec::new(),
            notify_tx,
        }
    }

    /// Appends one entry per text, all stamped with `timestamp`.
    ///
    /// Subscribers receive one `Appended` notification for the batch,
    /// followed by `ScrollToLatest`. Returns the number of entries added.
    pub fn append_batch<I, S>(&mut self, texts: I, timestamp: &str) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let first_index = self.entries.len();
        self.entries
            .extend(texts.into_iter().map(|t| LogEntry::new(t, timestamp)));
        let count = self.entries.len() - first_index;

        if count > 0 {
            // No subscribers is fine; the snapshot accessors still work.
            let _ = self.notify_tx.send(LogNotification::Appended { first_index, count });
            let _ = self.notify_tx.send(LogNotification::ScrollToLatest);
        }
        count
    }

    /// Registers a view for change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<LogNotification> {
        self.notify_tx.subscribe()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries appended at or after `index`; empty when out of range.
    pub fn entries_from(&self, index: usize) -> &[LogEntry] {
        self.entries.get(index..).unwrap_or_default()
    }

    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    /// The most recently appended entry, if any.
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LogSequence {
    fn default() -> Self {
        Self::new()
    }
}
