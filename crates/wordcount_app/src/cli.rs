use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use wordcount_core::TrailingWord;
use wordcount_engine::{PipelineConfig, TokenizerSettings, DEFAULT_CHUNK_SIZE};

use crate::logging::LogDestination;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// One tokenizer and one counter thread per file.
    Pipeline,
    /// One file at a time on the main thread.
    Sequential,
}

/// Count whitespace-separated words in text files.
#[derive(Debug, Parser)]
#[command(name = "wc")]
#[command(version)]
pub struct Args {
    /// Files to count.
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<String>,

    /// Bytes read from a file per call.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Do not count a last word that is not followed by whitespace.
    #[arg(long)]
    pub drop_trailing_word: bool,

    /// Words buffered between a file's reader and its counter.
    #[arg(long, default_value_t = 1024)]
    pub token_buffer: usize,

    #[arg(long, value_enum, default_value_t = Mode::Pipeline)]
    pub mode: Mode,

    /// Print the report as JSON instead of log lines.
    #[arg(long)]
    pub json: bool,

    /// Also write the diagnostic log to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors to the terminal.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn pipeline_config(&self) -> PipelineConfig {
        let trailing_word = if self.drop_trailing_word {
            TrailingWord::Drop
        } else {
            TrailingWord::Flush
        };
        PipelineConfig {
            tokenizer: TokenizerSettings {
                chunk_size: self.chunk_size,
                trailing_word,
            },
            token_channel_capacity: self.token_buffer,
            ..PipelineConfig::default()
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.quiet && self.log_file.is_none() {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match (&self.log_file, self.quiet) {
            (Some(path), true) => LogDestination::File(path.clone()),
            (Some(path), false) => LogDestination::Both(path.clone()),
            (None, _) => LogDestination::Terminal,
        }
    }
}
