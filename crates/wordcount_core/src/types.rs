pub type FileId = String;

/// One word found by a tokenizer, tagged with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken {
    pub file_id: FileId,
    pub word: String,
}

impl WordToken {
    pub fn new(file_id: impl Into<FileId>, word: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            word: word.into(),
        }
    }
}

/// Final word count for one file. Emitted exactly once per input file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileCount {
    file_id: FileId,
    count: u64,
}

impl FileCount {
    pub fn new(file_id: impl Into<FileId>, count: u64) -> Self {
        Self {
            file_id: file_id.into(),
            count,
        }
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}
