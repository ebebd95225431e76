use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Immutable snapshot of a note's text.
///
/// Every edit produces a new snapshot with a fresh revision; snapshots are
/// never patched in place, so anything computed against one (match lists,
/// overlay geometry) can tell whether it is still current by comparing
/// revisions.
///
/// All positions exposed by this crate are char offsets into the snapshot.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    text: Arc<str>,
    len_chars: usize,
    revision: u64,
}

fn next_revision() -> u64 {
    static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

impl TextBuffer {
    /// Create a snapshot from text
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let len_chars = text.chars().count();
        Self {
            text,
            len_chars,
            revision: next_revision(),
        }
    }

    /// Create an empty snapshot
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Produce the snapshot that replaces this one after an edit
    pub fn replace(&self, text: impl Into<Arc<str>>) -> Self {
        Self::new(text)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in chars
    pub fn len_chars(&self) -> usize {
        self.len_chars
    }

    pub fn is_empty(&self) -> bool {
        self.len_chars == 0
    }

    /// Revision of this snapshot (unique per snapshot, increasing)
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of `\n`-delimited lines (an empty buffer has one line)
    pub fn line_count(&self) -> usize {
        self.text.bytes().filter(|&b| b == b'\n').count() + 1
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextBuffer {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
