//! Bounded, timestamped event log
//!
//! Append-only log of human-relevant lines (device events, sent
//! commands, connection changes). Retention is bounded: once the cap
//! is exceeded, a contiguous block is dropped from the oldest end in
//! one go rather than entry-by-entry, amortizing the trim. Appends
//! never fail and never block.

use crate::config::EventLogConfig;
use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// One immutable log entry
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Wall-clock arrival time
    pub timestamp: DateTime<Local>,
    /// Free-text message, stored verbatim
    pub message: String,
}

impl EventRecord {
    /// Display form: `HH:MM:SS | message`
    pub fn display_line(&self) -> String {
        format!("{} | {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

/// Bounded ordered sequence of [`EventRecord`]s
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<EventRecord>,
    max_entries: usize,
    trim_block: usize,
}

impl EventLog {
    /// Create an empty log with the given retention settings
    pub fn new(config: &EventLogConfig) -> Self {
        Self {
            entries: VecDeque::with_capacity(config.max_entries + 1),
            max_entries: config.max_entries.max(1),
            trim_block: config.trim_block.max(1),
        }
    }

    /// Append a message stamped with the current wall-clock time
    pub fn append(&mut self, message: impl Into<String>) {
        self.append_at(Local::now(), message);
    }

    /// Append with an explicit timestamp (tests and replays)
    pub fn append_at(&mut self, timestamp: DateTime<Local>, message: impl Into<String>) {
        self.entries.push_back(EventRecord {
            timestamp,
            message: message.into(),
        });
        if self.entries.len() > self.max_entries {
            let trim = self.trim_block.min(self.entries.len());
            self.entries.drain(..trim);
        }
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retained entries, oldest to newest
    pub fn entries(&self) -> impl Iterator<Item = &EventRecord> {
        self.entries.iter()
    }

    /// Display lines, oldest to newest
    pub fn display_lines(&self) -> Vec<String> {
        self.entries.iter().map(EventRecord::display_line).collect()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(&EventLogConfig::default())
    }
}
