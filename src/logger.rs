use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;

use crate::formatter::Formatter;
use crate::record::{default_message_formatter, Level, LogRecord, MessageFormatter};
use crate::scope::{ScopeChain, ScopeGuard};
use crate::sink::CaptureSink;

/// Failure of a single log call.
#[derive(Debug, Error)]
pub enum LogError {
    /// The formatter failed while rendering, e.g. a malformed timestamp
    /// format string.
    #[error("failed to render log record: {0}")]
    Format(#[from] fmt::Error),
    /// The capture sink rejected the assembled entry.
    #[error("capture sink rejected entry: {0}")]
    Sink(Box<dyn std::error::Error + Send + Sync>),
}

/// Per-category logger that renders records and forwards them to the
/// capture sink.
///
/// Loggers created by one [`CaptureLoggerProvider`](crate::provider::CaptureLoggerProvider)
/// share its formatter, sink and scope chain. The logger itself is stateless
/// across calls: every record is rendered into a fresh buffer, so concurrent
/// calls from separate threads never see each other's partial output.
pub struct CaptureLogger {
    category: String,
    message_formatter: MessageFormatter,
    formatter: Arc<dyn Formatter>,
    scopes: Arc<ArcSwap<ScopeChain>>,
    sink: Arc<dyn CaptureSink>,
}

impl CaptureLogger {
    pub fn new(
        category: impl Into<String>,
        formatter: Arc<dyn Formatter>,
        scopes: Arc<ArcSwap<ScopeChain>>,
        sink: Arc<dyn CaptureSink>,
    ) -> Self {
        Self {
            category: category.into(),
            message_formatter: default_message_formatter,
            formatter,
            scopes,
            sink,
        }
    }

    /// Replace the message formatter applied to record state. The default
    /// renders the state's `Display` output as-is.
    pub fn message_formatter(mut self, formatter: MessageFormatter) -> Self {
        self.message_formatter = formatter;
        self
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Push a contextual scope visible to every record logged while the
    /// returned guard is alive. Scopes nest; dropping the guard releases
    /// exactly this scope.
    pub fn begin_scope(&self, value: impl fmt::Display + Send + Sync + 'static) -> ScopeGuard {
        self.scopes.load().push(value)
    }

    /// Format one record and forward it to the sink.
    ///
    /// **Parameters**
    /// - `level`: record severity.
    /// - `event_id`: numeric event id, rendered in minimal decimal form.
    /// - `state`: opaque payload handed to the message formatter.
    /// - `exception`: optional error rendered after the message, including
    ///   its `source()` chain.
    ///
    /// **Returns**
    /// - `Ok(())` if the entry reached the sink, or if the record resolved
    ///   to no output at all (suppression is a valid outcome, the sink is
    ///   not called).
    /// - `Err(..)` if rendering failed or the sink rejected the entry.
    pub fn log(
        &self,
        level: Level,
        event_id: i64,
        state: &dyn fmt::Display,
        exception: Option<&(dyn std::error::Error + 'static)>,
    ) -> Result<(), LogError> {
        let record = LogRecord {
            level,
            category: &self.category,
            event_id,
            state,
            exception,
            message_formatter: self.message_formatter,
        };

        let chain = self.scopes.load_full();
        let mut buffer = String::new();
        self.formatter.write(&record, chain.as_ref(), &mut buffer)?;

        if buffer.is_empty() {
            return Ok(());
        }
        self.sink.write_entry(&buffer).map_err(LogError::Sink)
    }
}
