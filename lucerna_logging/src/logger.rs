use std::fmt;
use std::sync::Arc;

/// The severity of a [`LogRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        write!(f, "{level}")
    }
}

/// A single log event, as delivered to a [`LogSink`].
#[derive(Clone, Copy, Debug)]
pub struct LogRecord<'a> {
    /// The severity of the event.
    pub level: LogLevel,
    /// The category of the logger that emitted the event.
    /// Empty for the root logger.
    pub category: &'a str,
    /// The rendered message.
    pub message: &'a str,
}

/// Receives every record emitted through a [`Logger`].
///
/// A backend usually shares a single sink across all the loggers it
/// creates, so implementations must be safe to use concurrently.
pub trait LogSink: Send + Sync + 'static {
    fn emit(&self, record: &LogRecord<'_>);
}

/// A cheap, cloneable logging handle bound to a category.
///
/// The handle does no I/O of its own: every record goes straight to the
/// backend sink it was created over. Cloning shares both the category and
/// the sink.
#[derive(Clone)]
pub struct Logger {
    category: Arc<str>,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    /// Create a handle bound to `category`, emitting into `sink`.
    pub fn new(category: impl Into<Arc<str>>, sink: Arc<dyn LogSink>) -> Self {
        Self {
            category: category.into(),
            sink,
        }
    }

    /// The category this handle emits under. Empty for the root logger.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Emit a record at the given level.
    pub fn log(&self, level: LogLevel, message: &str) {
        self.sink.emit(&LogRecord {
            level,
            category: &self.category,
            message,
        });
    }

    /// Emit at [`LogLevel::Trace`].
    pub fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message);
    }

    /// Emit at [`LogLevel::Debug`].
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Emit at [`LogLevel::Info`].
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Emit at [`LogLevel::Warn`].
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Emit at [`LogLevel::Error`].
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

impl lucerna::Service for Logger {}
