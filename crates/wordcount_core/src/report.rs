use std::fmt;
use std::time::Duration;

use crate::{FileCount, FileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Open,
    Read,
    /// A worker thread panicked before reporting.
    Aborted,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Open => write!(f, "open failed"),
            FailureKind::Read => write!(f, "read failed"),
            FailureKind::Aborted => write!(f, "aborted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub file_id: FileId,
    pub kind: FailureKind,
    pub message: String,
}

impl FailedFile {
    pub fn new(file_id: impl Into<FileId>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Everything one run produced: per-file counts in arrival order, per-file
/// failures and the wall-clock time of the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    pub counts: Vec<FileCount>,
    pub failures: Vec<FailedFile>,
    pub elapsed: Duration,
}

impl Report {
    pub fn total_words(&self) -> u64 {
        self.counts.iter().map(FileCount::count).sum()
    }

    pub fn file_count(&self) -> usize {
        self.counts.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn count_for(&self, file_id: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|count| count.file_id() == file_id)
            .map(FileCount::count)
    }

    /// Counts ordered by file identifier, for output that must not depend on
    /// which worker finished first.
    pub fn sorted_counts(&self) -> Vec<FileCount> {
        let mut counts = self.counts.clone();
        counts.sort();
        counts
    }
}
