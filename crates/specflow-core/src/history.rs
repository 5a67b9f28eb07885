//! Bounded log of past command invocations.
//!
//! The log is rewritten whole on every append and trimmed from the head
//! once it exceeds its cap. History is best effort: nothing in here returns
//! an error to the invoking command. Problems are logged with `tracing` and
//! surfaced as a [`HistoryOutcome`] so callers and tests can see what was
//! swallowed.
//!
//! There is no locking. Two processes appending at once can lose an entry.

use crate::error::Result;
use crate::io;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MAX_ENTRIES: usize = 100;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub command: String,
    pub spec: String,
    pub exit_code: i32,
    pub duration: String,
}

impl HistoryEntry {
    pub fn new(
        command: impl Into<String>,
        spec: impl Into<String>,
        exit_code: i32,
        duration: Duration,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            command: command.into(),
            spec: spec.into(),
            exit_code,
            duration: format_duration(duration),
        }
    }
}

/// Oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLog {
    #[serde(default)]
    pub entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Append `entry`, then drop the oldest entries beyond `max_entries`.
    pub fn push(&mut self, entry: HistoryEntry, max_entries: usize) {
        self.entries.push(entry);
        if self.entries.len() > max_entries {
            let excess = self.entries.len() - max_entries;
            self.entries.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The newest `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStage {
    Load,
    Save,
}

/// A failure that was logged and swallowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryIssue {
    pub stage: HistoryStage,
    pub message: String,
}

/// What happened to an append. Never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOutcome {
    /// The entry was persisted. `warnings` holds a swallowed load failure,
    /// in which case the log was restarted from empty.
    Recorded { warnings: Vec<HistoryIssue> },
    /// The entry could not be persisted.
    Dropped { issues: Vec<HistoryIssue> },
}

impl HistoryOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, HistoryOutcome::Recorded { .. })
    }

    pub fn issues(&self) -> &[HistoryIssue] {
        match self {
            HistoryOutcome::Recorded { warnings } => warnings,
            HistoryOutcome::Dropped { issues } => issues,
        }
    }
}

// ---------------------------------------------------------------------------
// HistoryWriter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HistoryWriter {
    path: PathBuf,
    max_entries: usize,
}

impl HistoryWriter {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted log. A missing file is an empty log.
    pub fn load(&self) -> Result<HistoryLog> {
        if !self.path.exists() {
            return Ok(HistoryLog::default());
        }
        let data = std::fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(HistoryLog::default());
        }
        let log: HistoryLog = serde_yaml::from_str(&data)?;
        Ok(log)
    }

    fn save(&self, log: &HistoryLog) -> Result<()> {
        let data = serde_yaml::to_string(log)?;
        io::atomic_write(&self.path, data.as_bytes())
    }

    pub fn append(&self, entry: HistoryEntry) -> HistoryOutcome {
        let mut warnings = Vec::new();
        let mut log = match self.load() {
            Ok(log) => log,
            Err(e) => {
                tracing::warn!("could not load history {}: {e}", self.path.display());
                warnings.push(HistoryIssue {
                    stage: HistoryStage::Load,
                    message: e.to_string(),
                });
                HistoryLog::default()
            }
        };

        log.push(entry, self.max_entries);

        match self.save(&log) {
            Ok(()) => HistoryOutcome::Recorded { warnings },
            Err(e) => {
                tracing::warn!("could not save history {}: {e}", self.path.display());
                warnings.push(HistoryIssue {
                    stage: HistoryStage::Save,
                    message: e.to_string(),
                });
                HistoryOutcome::Dropped { issues: warnings }
            }
        }
    }

    /// Stamp the current time and append.
    pub fn record(
        &self,
        command: &str,
        spec: &str,
        exit_code: i32,
        duration: Duration,
    ) -> HistoryOutcome {
        self.append(HistoryEntry::new(command, spec, exit_code, duration))
    }
}

/// `850ms`, `2.4s`, `3m12s`.
pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1_000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        let secs = d.as_secs();
        format!("{}m{}s", secs / 60, secs % 60)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
