//! The canonical document text store consumed by the edit session.

/// Whole-document text store.
///
/// The session always reads the full text, mutates a freshly parsed copy
/// and writes the full text back; there is no partial-document API.
/// `replace` is acknowledged asynchronously by the real store; the
/// session never blocks on or observes that acknowledgment, so an
/// implementation is free to queue the write.
pub trait DocumentStore {
    fn contents(&self) -> String;
    fn replace(&mut self, text: String);
}

/// In-memory store, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    text: String,
}

impl MemoryStore {
    pub fn new(text: impl Into<String>) -> Self {
        MemoryStore { text: text.into() }
    }
}

impl DocumentStore for MemoryStore {
    fn contents(&self) -> String {
        self.text.clone()
    }

    fn replace(&mut self, text: String) {
        self.text = text;
    }
}
