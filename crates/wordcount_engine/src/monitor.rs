use std::sync::mpsc::{self, Receiver, SendError, SyncSender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use wordcount_core::FileCount;
use wordcount_logging::wc_debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// At least one registered aggregator has not finished.
    Waiting,
    /// Every aggregator finished; the results channel is about to close.
    AllDone,
    /// The results channel is closed. Terminal.
    Closed,
}

#[derive(Debug)]
struct Progress {
    outstanding: usize,
    registered: usize,
    state: MonitorState,
}

#[derive(Debug)]
struct Tracker {
    progress: Mutex<Progress>,
    all_done: Condvar,
}

impl Tracker {
    fn lock(&self) -> MutexGuard<'_, Progress> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owns the shared results channel and closes it once every registered
/// aggregator has finished.
///
/// Aggregators are registered with [`CompletionMonitor::register`] before the
/// monitor starts waiting; waiting consumes the monitor, so nothing can be
/// registered afterwards.
#[derive(Debug)]
pub struct CompletionMonitor {
    tracker: Arc<Tracker>,
    sender: SyncSender<FileCount>,
}

impl CompletionMonitor {
    /// Creates the monitor together with the receiving end of the results channel.
    pub fn new(capacity: usize) -> (Self, Receiver<FileCount>) {
        let (sender, receiver) = mpsc::sync_channel(capacity);
        let tracker = Arc::new(Tracker {
            progress: Mutex::new(Progress {
                outstanding: 0,
                registered: 0,
                state: MonitorState::Waiting,
            }),
            all_done: Condvar::new(),
        });
        (Self { tracker, sender }, receiver)
    }

    /// Counts one more outstanding aggregator and hands out its writer.
    pub fn register(&self) -> ResultsWriter {
        {
            let mut progress = self.tracker.lock();
            progress.outstanding += 1;
            progress.registered += 1;
        }
        ResultsWriter {
            sender: self.sender.clone(),
            _completion: Completion {
                tracker: Arc::clone(&self.tracker),
            },
        }
    }

    pub fn probe(&self) -> MonitorProbe {
        MonitorProbe {
            tracker: Arc::clone(&self.tracker),
        }
    }

    /// Blocks until the outstanding count reaches zero, then closes the
    /// results channel.
    pub fn wait_and_close(self) {
        let CompletionMonitor { tracker, sender } = self;
        let mut progress = tracker.lock();
        while progress.outstanding > 0 {
            progress = tracker
                .all_done
                .wait(progress)
                .unwrap_or_else(PoisonError::into_inner);
        }
        progress.state = MonitorState::AllDone;
        // Every writer released its sender before decrementing, so this is
        // the last one.
        drop(sender);
        progress.state = MonitorState::Closed;
        wc_debug!(
            "results channel closed after {} aggregators",
            progress.registered
        );
    }
}

/// Read-only view of a monitor, usable after the monitor itself moved into
/// its thread.
#[derive(Debug, Clone)]
pub struct MonitorProbe {
    tracker: Arc<Tracker>,
}

impl MonitorProbe {
    pub fn state(&self) -> MonitorState {
        self.tracker.lock().state
    }

    pub fn outstanding(&self) -> usize {
        self.tracker.lock().outstanding
    }
}

#[derive(Debug)]
struct Completion {
    tracker: Arc<Tracker>,
}

impl Drop for Completion {
    fn drop(&mut self) {
        let mut progress = self.tracker.lock();
        debug_assert!(progress.outstanding > 0, "aggregator completed twice");
        progress.outstanding = progress.outstanding.saturating_sub(1);
        if progress.outstanding == 0 {
            self.tracker.all_done.notify_all();
        }
    }
}

/// Write access to the results channel for exactly one aggregator.
///
/// Sending consumes the writer. Dropping it without sending still marks the
/// aggregator as finished, so an early return or a panic never stalls the
/// monitor.
#[derive(Debug)]
pub struct ResultsWriter {
    // Field order matters: the sender is dropped before the completion
    // signal fires.
    sender: SyncSender<FileCount>,
    _completion: Completion,
}

impl ResultsWriter {
    pub fn send(self, count: FileCount) -> Result<(), SendError<FileCount>> {
        self.sender.send(count)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn closes_immediately_without_aggregators() {
        let (monitor, results) = CompletionMonitor::new(0);
        let probe = monitor.probe();
        monitor.wait_and_close();
        assert_eq!(probe.state(), MonitorState::Closed);
        assert!(results.recv().is_err());
    }

    #[test]
    fn stays_open_until_last_writer_finishes() {
        let (monitor, results) = CompletionMonitor::new(4);
        let first = monitor.register();
        let second = monitor.register();
        let probe = monitor.probe();
        assert_eq!(probe.outstanding(), 2);

        let closer = thread::spawn(move || monitor.wait_and_close());

        first.send(FileCount::new("a", 1)).unwrap();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(probe.state(), MonitorState::Waiting);
        assert_eq!(probe.outstanding(), 1);

        second.send(FileCount::new("b", 2)).unwrap();
        closer.join().unwrap();

        assert_eq!(probe.state(), MonitorState::Closed);
        let received: Vec<FileCount> = results.iter().collect();
        assert_eq!(received.len(), 2);
    }

    #[test]
    fn dropped_writer_counts_as_finished() {
        let (monitor, results) = CompletionMonitor::new(1);
        let writer = monitor.register();
        let probe = monitor.probe();
        drop(writer);
        assert_eq!(probe.outstanding(), 0);
        monitor.wait_and_close();
        assert!(results.iter().next().is_none());
        assert_eq!(probe.state(), MonitorState::Closed);
    }

    #[test]
    fn panicking_aggregator_still_completes() {
        let (monitor, results) = CompletionMonitor::new(1);
        let writer = monitor.register();
        let probe = monitor.probe();
        let worker = thread::spawn(move || {
            let _writer = writer;
            panic!("aggregator failed");
        });
        assert!(worker.join().is_err());
        monitor.wait_and_close();
        assert_eq!(probe.state(), MonitorState::Closed);
        assert!(results.recv().is_err());
    }
}
