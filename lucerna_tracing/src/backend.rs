use std::sync::Arc;

use lucerna::{RegistryBuilder, RegistryExtension};
use lucerna_logging::{
    LogLevel, LogRecord, LogSink, Logger, LoggerFactory, LoggerIntegration, LoggerProvider,
};

/// Forwards every record to the `tracing` event machinery.
///
/// The logger category travels as the `category` field of the emitted
/// event: `tracing` targets are fixed at the macro call site, so they
/// cannot carry a runtime category.
struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, record: &LogRecord<'_>) {
        match record.level {
            LogLevel::Trace => tracing::trace!(category = record.category, "{}", record.message),
            LogLevel::Debug => tracing::debug!(category = record.category, "{}", record.message),
            LogLevel::Info => tracing::info!(category = record.category, "{}", record.message),
            LogLevel::Warn => tracing::warn!(category = record.category, "{}", record.message),
            LogLevel::Error => tracing::error!(category = record.category, "{}", record.message),
        }
    }
}

/// A [`LoggerProvider`] emitting through the [`tracing`] ecosystem.
///
/// Loggers created by this provider turn every record into a `tracing`
/// event at the equivalent level, with the logger category attached as the
/// `category` field. Spans, filtering and output formatting stay entirely
/// in the hands of the installed `tracing` subscriber.
///
/// [`tracing`]: https://docs.rs/tracing/0.1.44/tracing
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLoggerProvider;

impl TracingLoggerProvider {
    pub fn new() -> Self {
        Self
    }
}

impl LoggerProvider for TracingLoggerProvider {
    fn create_logger(&self, category: &str) -> Logger {
        Logger::new(category, Arc::new(TracingSink))
    }
}

/// Installs the full logging stack, backed by [`tracing`]: the logging
/// integration plus a [`LoggerFactory`] over a [`TracingLoggerProvider`].
///
/// One install call is all an application needs:
///
/// ```
/// use lucerna::RegistryBuilder;
/// use lucerna_tracing::TracingLogging;
///
/// let mut builder = RegistryBuilder::new();
/// builder.install(TracingLogging::new());
/// ```
///
/// [`tracing`]: https://docs.rs/tracing/0.1.44/tracing
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogging;

impl TracingLogging {
    pub fn new() -> Self {
        Self
    }
}

impl RegistryExtension for TracingLogging {
    fn install(&self, builder: &mut RegistryBuilder) {
        builder.install(LoggerIntegration::new());
        builder.instance(LoggerFactory::new(Arc::new(TracingLoggerProvider::new())));
    }
}
