use crate::sink::CaptureSink;
use std::error::Error;

/// Writes entries to stdout through the `print!` macro.
///
/// The Rust test harness captures macro-based stdout per test, so entries
/// written here land in the failing test's recorded output. Entries already
/// carry their terminating line break, which is why this is `print!` and not
/// `println!`.
#[derive(Clone, Default)]
pub struct StdoutSink;

impl CaptureSink for StdoutSink {
    fn write_entry(&self, entry: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        print!("{}", entry);
        Ok(())
    }
}
