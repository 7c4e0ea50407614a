use std::cell::RefCell;
use std::io::Write;
use std::time::Duration;

use chrono::Local;
use serde::Serialize;
use wordcount_core::Report;
use wordcount_engine::{ReportEvent, ReportSink};
use wordcount_logging::{wc_debug, wc_warn};

type Clock = Box<dyn Fn() -> String>;

/// Writes one timestamped line per count and a closing elapsed-time line.
pub struct LineSink<W: Write> {
    out: RefCell<W>,
    clock: Clock,
}

impl<W: Write> LineSink<W> {
    pub fn new(out: W) -> Self {
        Self::with_clock(
            out,
            Box::new(|| Local::now().format("%Y%m%d %H:%M:%S%.3f").to_string()),
        )
    }

    pub fn with_clock(out: W, clock: Clock) -> Self {
        Self {
            out: RefCell::new(out),
            clock,
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn line(&self, message: &str) {
        let stamp = (self.clock)();
        let mut out = self.out.borrow_mut();
        if let Err(err) = writeln!(out, "{stamp} - {message}").and_then(|_| out.flush()) {
            wc_warn!("could not write report line: {}", err);
        }
    }
}

impl<W: Write> ReportSink for LineSink<W> {
    fn emit(&self, event: ReportEvent) {
        match event {
            ReportEvent::FileCounted(count) => {
                self.line(&format!("{}\twords in {}", count.count(), count.file_id()));
            }
            ReportEvent::Finished { elapsed, .. } => {
                self.line(&format!("Total elapsed time {elapsed:?}"));
            }
        }
    }
}

/// Leaves output to the JSON document printed after the run.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuietSink;

impl ReportSink for QuietSink {
    fn emit(&self, event: ReportEvent) {
        wc_debug!("{:?}", event);
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    files: Vec<JsonFile>,
    failures: Vec<JsonFailure<'a>>,
    total_words: u64,
    elapsed_ms: f64,
}

#[derive(Debug, Serialize)]
struct JsonFile {
    file: String,
    words: u64,
}

#[derive(Debug, Serialize)]
struct JsonFailure<'a> {
    file: &'a str,
    kind: String,
    message: &'a str,
}

/// Renders a report as pretty JSON, with files ordered by name.
pub fn render_json(report: &Report) -> serde_json::Result<String> {
    let document = JsonReport {
        files: report
            .sorted_counts()
            .into_iter()
            .map(|count| JsonFile {
                file: count.file_id().to_string(),
                words: count.count(),
            })
            .collect(),
        failures: report
            .failures
            .iter()
            .map(|failure| JsonFailure {
                file: &failure.file_id,
                kind: failure.kind.to_string(),
                message: &failure.message,
            })
            .collect(),
        total_words: report.total_words(),
        elapsed_ms: millis(report.elapsed),
    };
    serde_json::to_string_pretty(&document)
}

fn millis(elapsed: Duration) -> f64 {
    elapsed.as_micros() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use wordcount_core::{FailedFile, FailureKind, FileCount};

    use super::*;

    fn fixed_clock() -> Clock {
        Box::new(|| "20240102 03:04:05.678".to_string())
    }

    #[test]
    fn lines_use_timestamp_prefix() {
        let sink = LineSink::with_clock(Vec::new(), fixed_clock());
        sink.emit(ReportEvent::FileCounted(FileCount::new("notes.txt", 42)));
        sink.emit(ReportEvent::Finished {
            files: 1,
            total_words: 42,
            failed: 0,
            elapsed: Duration::from_millis(1500),
        });

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            text,
            "20240102 03:04:05.678 - 42\twords in notes.txt\n\
             20240102 03:04:05.678 - Total elapsed time 1.5s\n"
        );
    }

    #[test]
    fn json_lists_files_in_name_order() {
        let report = Report {
            counts: vec![FileCount::new("b.txt", 2), FileCount::new("a.txt", 0)],
            failures: vec![FailedFile::new("a.txt", FailureKind::Open, "not found")],
            elapsed: Duration::from_millis(3),
        };
        let json = render_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["files"][0]["file"], "a.txt");
        assert_eq!(value["files"][1]["words"], 2);
        assert_eq!(value["failures"][0]["kind"], "open failed");
        assert_eq!(value["total_words"], 2);
        assert_eq!(value["elapsed_ms"], 3.0);
    }
}
