use std::error::Error;
use std::fmt::{self, Write as _};
use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::record::{Level, LogRecord};
use crate::scope::ScopeAccess;

/// Layout options for [`SimpleFormatter`].
///
/// Immutable per formatter instance; supplied at construction.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterOptions {
    /// chrono strftime format for a timestamp prefix, e.g. `"%H:%M:%S "`.
    /// `None` disables the prefix.
    pub timestamp_format: Option<String>,
    /// Collapse each record onto a single line.
    pub single_line: bool,
    /// Render the active scope chain.
    pub include_scopes: bool,
    /// Format the timestamp in UTC instead of local time.
    pub use_utc_timestamp: bool,
}

/// Renders one log record into an output buffer.
///
/// This is the strategy seam of the adapter: the logger holds an
/// `Arc<dyn Formatter>`, so alternate layouts (JSON, logfmt) can be dropped
/// in without touching the logger itself.
pub trait Formatter: Send + Sync {
    /// Write the formatted record into `out`, or write nothing.
    ///
    /// **Parameters**
    /// - `record`: the event to render; never mutated.
    /// - `scopes`: accessor for the active scope chain; only traversed.
    /// - `out`: output buffer. The caller supplies it empty; an empty buffer
    ///   after the call means the record was suppressed.
    ///
    /// **Returns**
    /// - `Ok(())` on success, including the suppressed case.
    /// - `Err(fmt::Error)` if rendering itself failed, e.g. a malformed
    ///   timestamp format string.
    fn write(
        &self,
        record: &LogRecord<'_>,
        scopes: &dyn ScopeAccess,
        out: &mut String,
    ) -> fmt::Result;
}

const LEVEL_SEPARATOR: &str = ": ";

// Continuation lines align under the category column: 4-char level tag plus
// the 2-char separator. Every tag is 4 chars, so the width is constant.
const MESSAGE_PADDING: &str = "      ";

/// 4-character tag written in the level column.
pub fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Trace => "trce",
        Level::Debug => "dbug",
        Level::Information => "info",
        Level::Warning => "warn",
        Level::Error => "fail",
        Level::Critical => "crit",
    }
}

/// Console-style layout: `info: Category[0]` header, padded continuation
/// lines, optional timestamp prefix and scope chain.
pub struct SimpleFormatter {
    options: FormatterOptions,
    clock: Arc<dyn Clock>,
    line_separator: String,
}

impl SimpleFormatter {
    pub fn new(options: FormatterOptions) -> Self {
        Self {
            options,
            clock: Arc::new(SystemClock),
            line_separator: "\n".to_string(),
        }
    }

    /// Replace the time source. Tests pin it with
    /// [`FixedClock`](crate::clock::FixedClock) to get byte-identical output.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the line-break sequence.
    ///
    /// The same sequence is used for structural breaks and as the search and
    /// replacement target inside message and exception text, so tests can
    /// inject a fixed sequence instead of relying on a platform default.
    pub fn with_line_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }

    fn write_timestamp(&self, out: &mut String) -> fmt::Result {
        if let Some(format) = &self.options.timestamp_format {
            let now = self.clock.now();
            if self.options.use_utc_timestamp {
                write!(out, "{}", now.format(format))?;
            } else {
                write!(out, "{}", now.with_timezone(&Local).format(format))?;
            }
        }
        Ok(())
    }

    fn write_scopes(&self, out: &mut String, scopes: &dyn ScopeAccess) -> fmt::Result {
        if !self.options.include_scopes {
            return Ok(());
        }

        let single_line = self.options.single_line;
        let mut any_visited = false;
        let mut result = Ok(());
        scopes.for_each_scope(&mut |scope| {
            if any_visited {
                out.push_str(" => ");
            } else {
                any_visited = true;
                if single_line {
                    out.push_str(" => ");
                } else {
                    out.push_str(MESSAGE_PADDING);
                    out.push_str("=> ");
                }
            }
            if result.is_ok() {
                result = write!(out, "{}", scope);
            }
        });
        result?;

        if any_visited && !single_line {
            out.push_str(&self.line_separator);
        }
        Ok(())
    }

    // Shared by the message and the exception pass; they follow the same
    // single-line vs multi-line rules independently.
    fn write_message_block(&self, out: &mut String, text: &str) {
        if text.is_empty() {
            return;
        }

        if self.options.single_line {
            out.push(' ');
            out.push_str(&text.replace(&self.line_separator, " "));
        } else {
            out.push_str(MESSAGE_PADDING);
            let continuation = format!("{}{}", self.line_separator, MESSAGE_PADDING);
            out.push_str(&text.replace(&self.line_separator, &continuation));
            out.push_str(&self.line_separator);
        }
    }

    fn render_exception(&self, exception: &(dyn Error + 'static)) -> String {
        let mut text = exception.to_string();
        let mut cause = exception.source();
        while let Some(error) = cause {
            text.push_str(&self.line_separator);
            text.push_str("Caused by: ");
            text.push_str(&error.to_string());
            cause = error.source();
        }
        text
    }
}

impl Default for SimpleFormatter {
    fn default() -> Self {
        Self::new(FormatterOptions::default())
    }
}

impl Formatter for SimpleFormatter {
    fn write(
        &self,
        record: &LogRecord<'_>,
        scopes: &dyn ScopeAccess,
        out: &mut String,
    ) -> fmt::Result {
        let message = record.resolve_message();
        if record.exception.is_none() && message.is_empty() {
            return Ok(());
        }

        self.write_timestamp(out)?;

        // Example:
        // info: my_crate::server[10]
        //       request received
        out.push_str(level_tag(record.level));
        out.push_str(LEVEL_SEPARATOR);
        out.push_str(record.category);
        write!(out, "[{}]", record.event_id)?;
        if !self.options.single_line {
            out.push_str(&self.line_separator);
        }

        self.write_scopes(out, scopes)?;
        self.write_message_block(out, &message);
        if let Some(exception) = record.exception {
            self.write_message_block(out, &self.render_exception(exception));
        }

        // Single-line records carry their one terminating break here; in
        // multi-line mode every block above already ended with one.
        if self.options.single_line {
            out.push_str(&self.line_separator);
        }
        Ok(())
    }
}
