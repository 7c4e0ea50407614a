//! Word-count engine: file tokenizers, aggregators and the fan-in pipeline.
mod aggregate;
mod collect;
mod error;
mod monitor;
mod pipeline;
mod reader;
mod sequential;
mod settings;

pub use aggregate::aggregate;
pub use collect::{collect, ReportEvent, ReportSink};
pub use error::{ConfigError, TokenizeError};
pub use monitor::{CompletionMonitor, MonitorProbe, MonitorState, ResultsWriter};
pub use pipeline::Pipeline;
pub use reader::{tokenize_file, ConsumerGone, FsOpener, SourceOpener, TokenizeStats};
pub use settings::{PipelineConfig, TokenizerSettings, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
pub use wordcount_core::{
    FailedFile, FailureKind, FileCount, FileId, Report, TrailingWord, WordToken,
};
