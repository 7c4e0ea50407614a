//! Word-count core: record types, chunked tokenization and the run report.
mod report;
mod tokenize;
mod types;

pub use report::{FailedFile, FailureKind, Report};
pub use tokenize::{ChunkTokenizer, TrailingWord};
pub use types::{FileCount, FileId, WordToken};
