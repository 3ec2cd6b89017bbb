use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::formatter::{Formatter, FormatterOptions, SimpleFormatter};
use crate::logger::CaptureLogger;
use crate::scope::ScopeChain;
use crate::sink::CaptureSink;

/// Creates [`CaptureLogger`]s that share one formatter, one sink and one
/// scope chain.
pub struct CaptureLoggerProvider {
    formatter: Arc<dyn Formatter>,
    sink: Arc<dyn CaptureSink>,
    scopes: Arc<ArcSwap<ScopeChain>>,
}

impl CaptureLoggerProvider {
    /// Provider with default [`FormatterOptions`]: multi-line layout, no
    /// timestamp, scopes not rendered.
    pub fn new(sink: Arc<dyn CaptureSink>) -> Self {
        Self::with_options(sink, FormatterOptions::default())
    }

    /// Provider using [`SimpleFormatter`] with the given options.
    pub fn with_options(sink: Arc<dyn CaptureSink>, options: FormatterOptions) -> Self {
        Self::with_formatter(sink, Arc::new(SimpleFormatter::new(options)))
    }

    /// Provider using a custom [`Formatter`] implementation.
    pub fn with_formatter(sink: Arc<dyn CaptureSink>, formatter: Arc<dyn Formatter>) -> Self {
        Self {
            formatter,
            sink,
            scopes: Arc::new(ArcSwap::from_pointee(ScopeChain::new())),
        }
    }

    /// Create a logger for one category, wired to this provider's shared
    /// formatter, sink and scope chain.
    pub fn create_logger(&self, category: impl Into<String>) -> CaptureLogger {
        CaptureLogger::new(
            category,
            Arc::clone(&self.formatter),
            Arc::clone(&self.scopes),
            Arc::clone(&self.sink),
        )
    }

    /// Install an externally supplied scope chain.
    ///
    /// The swap is a single atomic pointer store. Loggers already handed out
    /// observe either the old chain or the new one, never a partial state,
    /// and a record being formatted concurrently keeps traversing whichever
    /// chain it loaded. No lock is held during traversal.
    pub fn set_scope_chain(&self, chain: Arc<ScopeChain>) {
        self.scopes.store(chain);
    }

    /// The currently installed scope chain.
    pub fn scope_chain(&self) -> Arc<ScopeChain> {
        self.scopes.load_full()
    }
}
