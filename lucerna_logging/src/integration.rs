use lucerna::{RegistryBuilder, RegistryExtension};

use crate::inject::LoggerInjector;
use crate::source::LoggerRegistrationSource;

/// Installs the logging integration into a registry builder: the on-demand
/// registration source for logger requests plus the constructor-injection
/// observer.
///
/// The integration does not bring a backend. Pair it with one, either by
/// installing a backend extension such as `lucerna_tracing::TracingLogging`
/// or by registering a [`LoggerFactory`](crate::LoggerFactory) instance
/// directly:
///
/// ```
/// use std::sync::Arc;
///
/// use lucerna::RegistryBuilder;
/// use lucerna_logging::{
///     LogRecord, LogSink, Logger, LoggerFactory, LoggerIntegration, LoggerProvider,
/// };
///
/// struct StderrSink;
///
/// impl LogSink for StderrSink {
///     fn emit(&self, record: &LogRecord<'_>) {
///         eprintln!("[{}] {}: {}", record.level, record.category, record.message);
///     }
/// }
///
/// struct StderrBackend;
///
/// impl LoggerProvider for StderrBackend {
///     fn create_logger(&self, category: &str) -> Logger {
///         Logger::new(category, Arc::new(StderrSink))
///     }
/// }
///
/// let mut builder = RegistryBuilder::new();
/// builder.install(LoggerIntegration::new());
/// builder.instance(LoggerFactory::new(Arc::new(StderrBackend)));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggerIntegration;

impl LoggerIntegration {
    pub fn new() -> Self {
        Self
    }
}

impl RegistryExtension for LoggerIntegration {
    fn install(&self, builder: &mut RegistryBuilder) {
        builder.add_source(LoggerRegistrationSource::new());
        builder.add_observer(LoggerInjector::new());
    }
}
