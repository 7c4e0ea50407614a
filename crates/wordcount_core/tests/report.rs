use std::time::Duration;

use wordcount_core::{FailedFile, FailureKind, FileCount, Report};

fn sample() -> Report {
    Report {
        counts: vec![
            FileCount::new("b.txt", 7),
            FileCount::new("a.txt", 3),
            FileCount::new("missing.txt", 0),
        ],
        failures: vec![FailedFile::new(
            "missing.txt",
            FailureKind::Open,
            "No such file or directory",
        )],
        elapsed: Duration::from_millis(12),
    }
}

#[test]
fn totals_sum_every_file() {
    let report = sample();
    assert_eq!(report.total_words(), 10);
    assert_eq!(report.file_count(), 3);
    assert!(report.has_failures());
}

#[test]
fn count_lookup_by_file_id() {
    let report = sample();
    assert_eq!(report.count_for("a.txt"), Some(3));
    assert_eq!(report.count_for("missing.txt"), Some(0));
    assert_eq!(report.count_for("other.txt"), None);
}

#[test]
fn sorted_counts_are_ordered_by_file_id() {
    let ids: Vec<String> = sample()
        .sorted_counts()
        .iter()
        .map(|count| count.file_id().to_string())
        .collect();
    assert_eq!(ids, vec!["a.txt", "b.txt", "missing.txt"]);
}

#[test]
fn empty_report_has_no_failures() {
    let report = Report::default();
    assert_eq!(report.total_words(), 0);
    assert!(!report.has_failures());
    assert_eq!(FailureKind::Read.to_string(), "read failed");
}
