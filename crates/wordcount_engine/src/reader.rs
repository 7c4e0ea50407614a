use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::time::{Duration, Instant};

use wordcount_core::ChunkTokenizer;
use wordcount_logging::{wc_debug, wc_error, wc_trace};

use crate::{TokenizeError, TokenizerSettings};

/// Opens the byte source behind a file identifier.
pub trait SourceOpener: Send + Sync {
    fn open(&self, file_id: &str) -> io::Result<Box<dyn Read + Send>>;
}

/// Treats file identifiers as filesystem paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsOpener;

impl SourceOpener for FsOpener {
    fn open(&self, file_id: &str) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(file_id)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenizeStats {
    pub bytes_read: u64,
    pub words: u64,
    pub elapsed: Duration,
}

/// Returned by a word callback when nobody is listening any more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerGone;

/// Reads one source chunk by chunk and hands every word to `emit`, in file order.
///
/// Open and read failures are logged here and returned. On a read failure the
/// words emitted so far stand and the unterminated word at the failure point
/// is discarded.
pub fn tokenize_file<F>(
    settings: &TokenizerSettings,
    opener: &dyn SourceOpener,
    file_id: &str,
    emit: F,
) -> Result<TokenizeStats, TokenizeError>
where
    F: FnMut(String) -> Result<(), ConsumerGone>,
{
    let started = Instant::now();
    wc_debug!("tokenizer started for {}", file_id);

    let result = opener
        .open(file_id)
        .map_err(|source| TokenizeError::Open {
            file_id: file_id.to_string(),
            source,
        })
        .and_then(|mut input| read_words(settings, file_id, &mut input, emit));

    match result {
        Ok(mut stats) => {
            stats.elapsed = started.elapsed();
            wc_debug!(
                "tokenizer finished in {:?} for {} ({} bytes, {} words)",
                stats.elapsed,
                file_id,
                stats.bytes_read,
                stats.words
            );
            Ok(stats)
        }
        Err(err) => {
            wc_error!("{}", err);
            Err(err)
        }
    }
}

fn read_words<F>(
    settings: &TokenizerSettings,
    file_id: &str,
    input: &mut dyn Read,
    mut emit: F,
) -> Result<TokenizeStats, TokenizeError>
where
    F: FnMut(String) -> Result<(), ConsumerGone>,
{
    let mut tokenizer = ChunkTokenizer::new(settings.trailing_word);
    let mut buf = vec![0u8; settings.chunk_size];
    let mut stats = TokenizeStats::default();
    let disconnected = |_: ConsumerGone| TokenizeError::Disconnected {
        file_id: file_id.to_string(),
    };

    loop {
        let read = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(TokenizeError::Read {
                    file_id: file_id.to_string(),
                    bytes_read: stats.bytes_read,
                    source,
                })
            }
        };
        stats.bytes_read += read as u64;
        // Only the bytes this read filled; the rest of `buf` is stale.
        tokenizer
            .feed(&buf[..read], |word| emit(word).map(|()| stats.words += 1))
            .map_err(disconnected)?;
    }

    let pending = tokenizer.has_pending_word();
    match tokenizer.finish() {
        Some(word) => {
            emit(word).map_err(disconnected)?;
            stats.words += 1;
        }
        None if pending => wc_trace!("dropped unterminated last word of {}", file_id),
        None => {}
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use wordcount_core::TrailingWord;

    use super::*;

    struct InMemory(&'static str);

    impl SourceOpener for InMemory {
        fn open(&self, _file_id: &str) -> io::Result<Box<dyn Read + Send>> {
            Ok(Box::new(Cursor::new(self.0.as_bytes())))
        }
    }

    fn words_of(
        text: &'static str,
        settings: TokenizerSettings,
    ) -> (Vec<String>, TokenizeStats) {
        let mut words = Vec::new();
        let stats = tokenize_file(&settings, &InMemory(text), "mem", |word| {
            words.push(word);
            Ok(())
        })
        .unwrap();
        (words, stats)
    }

    #[test]
    fn small_chunks_reassemble_words() {
        let settings = TokenizerSettings {
            chunk_size: 3,
            ..TokenizerSettings::default()
        };
        let (words, stats) = words_of("alphabet soup\n", settings);
        assert_eq!(words, vec!["alphabet", "soup"]);
        assert_eq!(stats.bytes_read, 14);
        assert_eq!(stats.words, 2);
    }

    #[test]
    fn short_last_read_does_not_leak_stale_bytes() {
        // The second read fills one byte of a four byte buffer that still
        // holds "abcd" from the first read.
        let settings = TokenizerSettings {
            chunk_size: 4,
            trailing_word: TrailingWord::Flush,
        };
        let (words, _) = words_of("abcde", settings);
        assert_eq!(words, vec!["abcde"]);
    }

    #[test]
    fn drop_policy_reports_fewer_words() {
        let settings = TokenizerSettings {
            trailing_word: TrailingWord::Drop,
            ..TokenizerSettings::default()
        };
        let (words, stats) = words_of("a b c", settings);
        assert_eq!(words, vec!["a", "b"]);
        assert_eq!(stats.words, 2);
    }

    #[test]
    fn gone_consumer_stops_the_tokenizer() {
        let err = tokenize_file(
            &TokenizerSettings::default(),
            &InMemory("one two three "),
            "mem",
            |_| Err(ConsumerGone),
        )
        .unwrap_err();
        assert!(matches!(err, TokenizeError::Disconnected { .. }));
    }
}
