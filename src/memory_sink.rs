use crate::sink::CaptureSink;
use std::error::Error;
use std::sync::{Arc, Mutex, PoisonError};

/// Collects entries in memory for deterministic assertions.
///
/// Clones share the same storage, so a test keeps one handle and hands
/// another to the provider.
#[derive(Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries, in write order.
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop all recorded entries.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl CaptureSink for MemorySink {
    fn write_entry(&self, entry: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.to_string());
        Ok(())
    }
}
