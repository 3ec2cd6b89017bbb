use crate::sink::CaptureSink;
use std::error::Error;

/// A sink that simply drops all entries.
///
/// Useful for measuring the overhead of formatting itself without any
/// output channel, and for tests that don't care about the rendered text.
#[derive(Clone, Default)]
pub struct NoopSink;

impl CaptureSink for NoopSink {
    fn write_entry(&self, _entry: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}
