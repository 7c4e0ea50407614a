use std::sync::mpsc::Receiver;
use std::time::Duration;

use wordcount_core::{FileCount, Report};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// One file's final count, in arrival order.
    FileCounted(FileCount),
    /// Emitted once, after every file has been counted.
    Finished {
        files: usize,
        total_words: u64,
        failed: usize,
        elapsed: Duration,
    },
}

/// Destination for results. Formatting and output are up to the implementor.
pub trait ReportSink {
    fn emit(&self, event: ReportEvent);
}

/// Drains the shared results channel until it is closed, forwarding every
/// count to `sink` as it arrives.
pub fn collect(results: Receiver<FileCount>, sink: &dyn ReportSink) -> Vec<FileCount> {
    let mut counts = Vec::new();
    for count in results {
        sink.emit(ReportEvent::FileCounted(count.clone()));
        counts.push(count);
    }
    counts
}

pub(crate) fn report_finished(sink: &dyn ReportSink, report: &Report) {
    sink.emit(ReportEvent::Finished {
        files: report.file_count(),
        total_words: report.total_words(),
        failed: report.failures.len(),
        elapsed: report.elapsed,
    });
}
