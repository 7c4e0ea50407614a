use std::time::Instant;

use wordcount_core::{FileCount, FileId, Report};
use wordcount_logging::wc_info;

use crate::collect::report_finished;
use crate::{tokenize_file, ReportEvent, ReportSink, SourceOpener, TokenizerSettings};

/// Counts files one after another on the calling thread, without channels.
///
/// Produces the same counts as the concurrent pipeline, with results in input
/// order.
pub(crate) fn count_files(
    settings: &TokenizerSettings,
    opener: &dyn SourceOpener,
    files: &[FileId],
    sink: &dyn ReportSink,
) -> Report {
    let started = Instant::now();
    wc_info!("counting words in {} files sequentially", files.len());

    let mut report = Report::default();
    for file_id in files {
        let mut words = 0u64;
        let outcome = tokenize_file(settings, opener, file_id, |_| {
            words += 1;
            Ok(())
        });
        if let Err(err) = outcome {
            report.failures.push(err.to_failed_file());
        }
        let count = FileCount::new(file_id.as_str(), words);
        sink.emit(ReportEvent::FileCounted(count.clone()));
        report.counts.push(count);
    }

    report.elapsed = started.elapsed();
    report_finished(sink, &report);
    report
}
