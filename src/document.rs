//! Documents shown in the central panel.
//!
//! The core only tracks which documents are open and which one is active.
//! Contents live in an external [`DocumentSource`] and are addressed through
//! an opaque [`ContentHandle`] that the core never frees or interprets.

use std::collections::HashMap;

/// Opaque key into a document source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHandle(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub handle: ContentHandle,
}

impl DocumentRef {
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        title: impl Into<String>,
        handle: ContentHandle,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            title: title.into(),
            handle,
        }
    }
}

pub trait DocumentSource {
    /// Fetch the content behind `handle`, or `None` when the source no longer
    /// knows it.
    fn content(&self, handle: ContentHandle) -> Option<String>;
}

/// Simple map-backed source used by the demo shell and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDocuments {
    contents: HashMap<ContentHandle, String>,
    next: u64,
}

impl InMemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, content: impl Into<String>) -> ContentHandle {
        let handle = ContentHandle(self.next);
        self.next += 1;
        self.contents.insert(handle, content.into());
        handle
    }

    pub fn remove(&mut self, handle: ContentHandle) -> Option<String> {
        self.contents.remove(&handle)
    }
}

impl DocumentSource for InMemoryDocuments {
    fn content(&self, handle: ContentHandle) -> Option<String> {
        self.contents.get(&handle).cloned()
    }
}
