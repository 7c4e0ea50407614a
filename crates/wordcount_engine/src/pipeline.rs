use std::sync::mpsc::{self, SyncSender};
use std::thread;
use std::time::Instant;

use wordcount_core::{FailedFile, FailureKind, FileId, Report, WordToken};
use wordcount_logging::{wc_error, wc_info};

use crate::collect::report_finished;
use crate::{
    aggregate, collect, sequential, tokenize_file, CompletionMonitor, ConfigError, ConsumerGone,
    FsOpener, MonitorState, PipelineConfig, ReportSink, SourceOpener, TokenizeError,
    TokenizeStats,
};

/// Runs one tokenizer and one aggregator per file and fans their counts in
/// to a single collector.
pub struct Pipeline {
    config: PipelineConfig,
    opener: Box<dyn SourceOpener>,
}

impl Pipeline {
    /// Pipeline over filesystem paths.
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        Self::with_opener(config, FsOpener)
    }

    pub fn with_opener(
        config: PipelineConfig,
        opener: impl SourceOpener + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            opener: Box::new(opener),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Counts every file concurrently and blocks until the last count has
    /// been delivered to `sink`.
    ///
    /// A file that cannot be opened or read still yields exactly one count;
    /// its error is listed in [`Report::failures`].
    pub fn run(&self, files: &[FileId], sink: &dyn ReportSink) -> Report {
        let started = Instant::now();
        wc_info!("counting words in {} files", files.len());

        let (monitor, results) = CompletionMonitor::new(self.config.results_channel_capacity);
        // Register every aggregator before any of them runs.
        let writers: Vec<_> = files.iter().map(|_| monitor.register()).collect();
        let probe = monitor.probe();

        let (counts, failures) = thread::scope(|scope| {
            let mut tokenizers = Vec::with_capacity(files.len());
            let mut aggregators = Vec::with_capacity(files.len());
            for (file_id, writer) in files.iter().zip(writers) {
                let (token_tx, token_rx) = mpsc::sync_channel(self.config.token_channel_capacity);
                let tokenizer = scope.spawn(move || self.tokenize(file_id, token_tx));
                tokenizers.push((file_id, tokenizer));
                let aggregator = scope.spawn(move || aggregate(file_id, token_rx, writer));
                aggregators.push((file_id, aggregator));
            }
            let closer = scope.spawn(move || monitor.wait_and_close());

            let counts = collect(results, sink);

            let mut failures = Vec::new();
            for (file_id, handle) in tokenizers {
                match handle.join() {
                    Ok(Ok(_)) => {}
                    Ok(Err(err)) => failures.push(err.to_failed_file()),
                    Err(_) => {
                        wc_error!("tokenizer for {} panicked", file_id);
                        failures.push(FailedFile::new(
                            file_id.as_str(),
                            FailureKind::Aborted,
                            "tokenizer panicked",
                        ));
                    }
                }
            }
            for (file_id, handle) in aggregators {
                if handle.join().is_err() {
                    wc_error!("aggregator for {} panicked", file_id);
                    failures.push(FailedFile::new(
                        file_id.as_str(),
                        FailureKind::Aborted,
                        "aggregator panicked",
                    ));
                }
            }
            if closer.join().is_err() {
                wc_error!("completion monitor panicked");
            }
            (counts, failures)
        });
        debug_assert_eq!(probe.state(), MonitorState::Closed);

        let report = Report {
            counts,
            failures,
            elapsed: started.elapsed(),
        };
        report_finished(sink, &report);
        report
    }

    /// Counts the files one at a time on the calling thread.
    pub fn run_sequential(&self, files: &[FileId], sink: &dyn ReportSink) -> Report {
        sequential::count_files(&self.config.tokenizer, self.opener.as_ref(), files, sink)
    }

    fn tokenize(
        &self,
        file_id: &str,
        tokens: SyncSender<WordToken>,
    ) -> Result<TokenizeStats, TokenizeError> {
        // `tokens` is dropped on return, which closes the aggregator's input
        // on every path.
        tokenize_file(
            &self.config.tokenizer,
            self.opener.as_ref(),
            file_id,
            |word| {
                tokens
                    .send(WordToken::new(file_id, word))
                    .map_err(|_| ConsumerGone)
            },
        )
    }
}
