/// What to do with a word that is still being accumulated when input ends.
///
/// Words are only completed by a transition into whitespace, so a file that
/// does not end in whitespace leaves its last word in the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingWord {
    /// Emit the pending word at end of input.
    #[default]
    Flush,
    /// Discard the pending word, matching the historical behaviour of the tool.
    Drop,
}

/// Incremental whitespace tokenizer fed with raw byte chunks.
///
/// The word accumulator, the whitespace flag and any UTF-8 sequence cut by a
/// chunk boundary all survive between calls to [`ChunkTokenizer::feed`], so
/// the words produced never depend on where the input was split.
#[derive(Debug, Clone)]
pub struct ChunkTokenizer {
    trailing: TrailingWord,
    word: String,
    in_whitespace: bool,
    pending: Vec<u8>,
}

impl ChunkTokenizer {
    pub fn new(trailing: TrailingWord) -> Self {
        Self {
            trailing,
            word: String::new(),
            in_whitespace: true,
            pending: Vec::new(),
        }
    }

    /// Tokenizes `bytes`, calling `emit` once per completed word in input order.
    ///
    /// Stops at the first error returned by `emit` and hands it back; words
    /// already emitted stay emitted.
    pub fn feed<E, F>(&mut self, bytes: &[u8], mut emit: F) -> Result<(), E>
    where
        F: FnMut(String) -> Result<(), E>,
    {
        let carried;
        let mut rest = if self.pending.is_empty() {
            bytes
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.extend_from_slice(bytes);
            carried = joined;
            &carried[..]
        };

        while !rest.is_empty() {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    self.scan(text, &mut emit)?;
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    self.scan(&String::from_utf8_lossy(valid), &mut emit)?;
                    match err.error_len() {
                        // Truncated sequence at the end of the chunk.
                        None => {
                            self.pending.extend_from_slice(after);
                            break;
                        }
                        Some(len) => {
                            self.push(char::REPLACEMENT_CHARACTER, &mut emit)?;
                            rest = &after[len..];
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Ends the input and returns the trailing word if the policy keeps it.
    pub fn finish(mut self) -> Option<String> {
        if !self.pending.is_empty() {
            // An unfinished sequence at end of input is malformed; it counts
            // as part of the current word.
            self.word.push(char::REPLACEMENT_CHARACTER);
        }
        match self.trailing {
            TrailingWord::Flush if !self.word.is_empty() => Some(self.word),
            TrailingWord::Flush | TrailingWord::Drop => None,
        }
    }

    /// Returns true while a partial word is waiting for a whitespace boundary.
    pub fn has_pending_word(&self) -> bool {
        !self.word.is_empty() || !self.pending.is_empty()
    }

    fn scan<E, F>(&mut self, text: &str, emit: &mut F) -> Result<(), E>
    where
        F: FnMut(String) -> Result<(), E>,
    {
        for c in text.chars() {
            self.push(c, emit)?;
        }
        Ok(())
    }

    fn push<E, F>(&mut self, c: char, emit: &mut F) -> Result<(), E>
    where
        F: FnMut(String) -> Result<(), E>,
    {
        if c.is_whitespace() {
            if !self.in_whitespace {
                self.in_whitespace = true;
                emit(std::mem::take(&mut self.word))?;
            }
        } else {
            self.in_whitespace = false;
            self.word.push(c);
        }
        Ok(())
    }
}

impl Default for ChunkTokenizer {
    fn default() -> Self {
        Self::new(TrailingWord::default())
    }
}
