use std::error::Error;
use std::fmt;

/// Severity of a single log record.
///
/// The set is closed: every match over it is exhaustive and there is no
/// catch-all variant to default into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Information,
    Warning,
    Error,
    Critical,
}

/// Renders a record's opaque state and optional error into the message text.
///
/// An empty result means "no message"; a record with no message and no
/// exception produces no output at all.
pub type MessageFormatter = fn(&dyn fmt::Display, Option<&(dyn Error + 'static)>) -> String;

/// Default message formatter: the state's `Display` output. The error is
/// ignored here because exception text gets its own formatting pass.
pub fn default_message_formatter(
    state: &dyn fmt::Display,
    _exception: Option<&(dyn Error + 'static)>,
) -> String {
    state.to_string()
}

/// Borrowed view of one structured log event, assembled per log call and
/// discarded after formatting.
pub struct LogRecord<'a> {
    pub level: Level,
    pub category: &'a str,
    pub event_id: i64,
    pub state: &'a dyn fmt::Display,
    pub exception: Option<&'a (dyn Error + 'static)>,
    pub message_formatter: MessageFormatter,
}

impl LogRecord<'_> {
    /// Resolve the message text by applying the record's message formatter
    /// to its state and exception.
    pub fn resolve_message(&self) -> String {
        (self.message_formatter)(self.state, self.exception)
    }
}
