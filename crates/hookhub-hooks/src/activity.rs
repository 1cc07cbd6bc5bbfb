//! In-process activity log of bind/dispatch/error events.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

/// A single timestamped, sequence-numbered log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Monotonic sequence number, unique within one log.
    pub seq: u64,
    /// When the entry was appended.
    pub timestamp: DateTime<Utc>,
    /// The message.
    pub message: String,
}

/// Bounded, append-only log of engine activity.
///
/// Writes happen during bind, dispatch, and error handling; reads are
/// snapshot copies taken by the host for diagnostics. The log is a ring:
/// once `capacity` entries exist, appending evicts the oldest. Sequence
/// numbers stay monotonic, so eviction shows up as a gap at the front.
#[derive(Debug)]
pub struct ActivityLog {
    entries: RwLock<VecDeque<LogEntry>>,
    next_seq: AtomicU64,
    capacity: usize,
}

impl ActivityLog {
    /// Create a log bounded at `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            next_seq: AtomicU64::new(0),
            capacity: capacity.max(1),
        }
    }

    /// Append a message.
    pub fn append(&self, message: impl Into<String>) {
        let entry = LogEntry {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            timestamp: Utc::now(),
            message: message.into(),
        };

        let mut entries = self.entries.write();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Snapshot of all retained entries, oldest first.
    pub fn read(&self) -> Vec<LogEntry> {
        self.entries.read().iter().cloned().collect()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the log holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
