use std::error::Error;

/// Destination for fully formatted log entries produced by
/// [`CaptureLogger`](crate::logger::CaptureLogger).
///
/// Implementations connect the adapter to a concrete captured-output channel
/// (the test harness's stdout capture, an in-memory buffer, etc). The logger
/// calls `write_entry` synchronously, once per record, only after the full
/// text has been assembled; no I/O happens during formatting.
pub trait CaptureSink: Send + Sync {
    /// Record one complete formatted entry.
    ///
    /// **Parameters**
    /// - `entry`: the full text of one log record, already terminated by the
    ///   formatter's line-break sequence. Sinks append it verbatim as a
    ///   single recorded entry, without splitting or re-terminating it.
    ///
    /// **Returns**
    /// - `Ok(())` if the entry was accepted by the channel.
    /// - `Err(..)` if the channel failed. The logger neither retries nor
    ///   swallows the error; it propagates to the caller of the log call as
    ///   [`LogError::Sink`](crate::logger::LogError).
    fn write_entry(&self, entry: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}
