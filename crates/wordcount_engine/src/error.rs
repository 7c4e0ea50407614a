use std::io;

use thiserror::Error;
use wordcount_core::{FailedFile, FailureKind, FileId};

#[derive(Debug, Error)]
pub enum TokenizeError {
    #[error("error opening file {file_id}: {source}")]
    Open {
        file_id: FileId,
        #[source]
        source: io::Error,
    },
    #[error("error reading file {file_id} after {bytes_read} bytes: {source}")]
    Read {
        file_id: FileId,
        bytes_read: u64,
        #[source]
        source: io::Error,
    },
    #[error("token consumer for {file_id} hung up")]
    Disconnected { file_id: FileId },
}

impl TokenizeError {
    pub fn file_id(&self) -> &str {
        match self {
            TokenizeError::Open { file_id, .. }
            | TokenizeError::Read { file_id, .. }
            | TokenizeError::Disconnected { file_id } => file_id,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            TokenizeError::Open { .. } => FailureKind::Open,
            TokenizeError::Read { .. } => FailureKind::Read,
            TokenizeError::Disconnected { .. } => FailureKind::Aborted,
        }
    }

    pub fn to_failed_file(&self) -> FailedFile {
        let message = match self {
            TokenizeError::Open { source, .. } | TokenizeError::Read { source, .. } => {
                source.to_string()
            }
            TokenizeError::Disconnected { .. } => self.to_string(),
        };
        FailedFile::new(self.file_id(), self.kind(), message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
    #[error("chunk size {actual} exceeds the maximum of {max} bytes")]
    ChunkSizeTooLarge { max: usize, actual: usize },
}
