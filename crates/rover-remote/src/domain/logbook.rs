//! Bounded diagnostic history for the operator.
//!
//! The logbook is the presentation layer's view of what the link has been
//! doing: a most-recent-first ring of at most 256 entries. Every appended
//! line is also forwarded to `tracing`, so terminal output and the on-screen
//! history never disagree.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::Local;
use tracing::{debug, error, info, trace, warn};

/// Maximum number of retained entries; the oldest entry is dropped first.
const CAPACITY: usize = 256;

/// Severity of a logbook entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// One timestamped diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Wall-clock stamp, formatted `[HH:MM:SS]`.
    pub time: String,
    pub level: LogLevel,
    pub text: String,
}

/// A bounded, most-recent-first diagnostic ring.
///
/// Interior mutability lets the connection tasks, the poller, and the
/// dispatch policy share one logbook behind an `Arc` without coordinating
/// writes.
#[derive(Debug, Default)]
pub struct Logbook {
    entries: Mutex<VecDeque<LogEntry>>,
}

impl Logbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line at the front of the history and forwards it to the
    /// matching `tracing` level. The oldest entry is dropped once the ring
    /// holds [`CAPACITY`] lines.
    pub fn append(&self, level: LogLevel, text: impl Into<String>) {
        let text = text.into();
        match level {
            LogLevel::Error => error!("{text}"),
            LogLevel::Warn => warn!("{text}"),
            LogLevel::Info => info!("{text}"),
            LogLevel::Debug => debug!("{text}"),
            LogLevel::Trace => trace!("{text}"),
        }

        let entry = LogEntry {
            time: Local::now().format("[%H:%M:%S]").to_string(),
            level,
            text,
        };

        let mut entries = self.entries.lock().expect("logbook lock poisoned");
        entries.push_front(entry);
        entries.truncate(CAPACITY);
    }

    /// Snapshot of the history, most recent first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .expect("logbook lock poisoned")
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("logbook lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
