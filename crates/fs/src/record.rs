use std::path::PathBuf;

/// One file selected for a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    /// File name, lossily decoded when it is not valid UTF-8
    pub name: String,
    /// 0-based position after sorting
    pub sequence_index: usize,
}

impl FileEntry {
    pub(crate) fn unsorted(path: PathBuf, name: String) -> Self {
        Self {
            path,
            name,
            sequence_index: 0,
        }
    }
}

/// Result of listing a directory.
#[derive(Debug, Default)]
pub struct Listing {
    /// Retained files, sorted and indexed
    pub entries: Vec<FileEntry>,
    /// Entries that could not be inspected while listing
    pub skipped: usize,
}
