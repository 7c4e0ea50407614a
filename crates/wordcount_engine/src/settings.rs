use wordcount_core::TrailingWord;

use crate::ConfigError;

/// Bytes read from a file per call.
pub const DEFAULT_CHUNK_SIZE: usize = 32 * 1024;
/// Upper bound on a single read buffer.
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerSettings {
    pub chunk_size: usize,
    pub trailing_word: TrailingWord,
}

impl Default for TokenizerSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            trailing_word: TrailingWord::Flush,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub tokenizer: TokenizerSettings,
    /// Bound of each per-file token channel. Zero makes every send a rendezvous.
    pub token_channel_capacity: usize,
    /// Bound of the results channel shared by all aggregators.
    pub results_channel_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerSettings::default(),
            token_channel_capacity: 1024,
            results_channel_capacity: 16,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chunk_size = self.tokenizer.chunk_size;
        if chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigError::ChunkSizeTooLarge {
                max: MAX_CHUNK_SIZE,
                actual: chunk_size,
            });
        }
        Ok(())
    }
}
