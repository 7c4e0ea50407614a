use std::sync::mpsc::Receiver;
use std::time::Instant;

use wordcount_core::{FileCount, WordToken};
use wordcount_logging::{wc_debug, wc_warn};

use crate::ResultsWriter;

/// Counts the tokens of one file until its tokenizer closes the channel, then
/// publishes a single [`FileCount`], even when the count is zero.
///
/// Returns the count that was published.
pub fn aggregate(file_id: &str, tokens: Receiver<WordToken>, writer: ResultsWriter) -> u64 {
    let started = Instant::now();
    wc_debug!("aggregator started for {}", file_id);

    let count = tokens.iter().count() as u64;

    if writer.send(FileCount::new(file_id, count)).is_err() {
        wc_warn!("collector hung up; count for {} discarded", file_id);
    }
    wc_debug!(
        "aggregator finished in {:?} for {} ({} words)",
        started.elapsed(),
        file_id,
        count
    );
    count
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::{CompletionMonitor, MonitorState};

    #[test]
    fn publishes_one_count_per_file() {
        let (monitor, results) = CompletionMonitor::new(1);
        let writer = monitor.register();
        let probe = monitor.probe();
        let (tx, rx) = mpsc::sync_channel(8);
        for word in ["x", "y", "x"] {
            tx.send(WordToken::new("f", word)).unwrap();
        }
        drop(tx);

        assert_eq!(aggregate("f", rx, writer), 3);
        assert_eq!(probe.outstanding(), 0);
        monitor.wait_and_close();

        let received: Vec<FileCount> = results.iter().collect();
        assert_eq!(received, vec![FileCount::new("f", 3)]);
        assert_eq!(probe.state(), MonitorState::Closed);
    }

    #[test]
    fn closed_input_without_tokens_publishes_zero() {
        let (monitor, results) = CompletionMonitor::new(1);
        let writer = monitor.register();
        let (tx, rx) = mpsc::sync_channel::<WordToken>(0);
        drop(tx);

        assert_eq!(aggregate("empty", rx, writer), 0);
        assert_eq!(results.recv().unwrap(), FileCount::new("empty", 0));
    }
}
