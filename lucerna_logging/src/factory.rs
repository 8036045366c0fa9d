use std::fmt;
use std::sync::Arc;

use crate::logger::Logger;

/// Creates named logger handles over an actual logging backend.
///
/// The handles a provider creates typically share one
/// [`LogSink`](crate::LogSink) behind the scenes; that is the provider's
/// call.
pub trait LoggerProvider: Send + Sync + 'static {
    /// Create a handle bound to `category`.
    ///
    /// Must succeed for every input, including the empty string (the root
    /// category): creating a handle is naming, not I/O.
    fn create_logger(&self, category: &str) -> Logger;
}

/// The logger factory handed out by the registry: an adapter over exactly
/// one [`LoggerProvider`].
///
/// [`create`](Self::create) cannot fail. The factory only builds named
/// handles; every fallible concern stays behind the provider's sink. It
/// does not own the backend's lifetime either: dropping the factory leaves
/// the backend untouched.
pub struct LoggerFactory {
    provider: Arc<dyn LoggerProvider>,
}

impl LoggerFactory {
    /// Wrap the provider this factory delegates to.
    pub fn new(provider: Arc<dyn LoggerProvider>) -> Self {
        Self { provider }
    }

    /// Create a logger bound to `category`.
    ///
    /// The empty string yields the root logger.
    pub fn create(&self, category: &str) -> Logger {
        self.provider.create_logger(category)
    }

    /// Ignored: the factory composes exactly one provider.
    ///
    /// The attempt is recorded as a `tracing` self-diagnostic and otherwise
    /// has no effect. The provider the factory was created over keeps
    /// serving every request.
    pub fn add_provider(&self, _provider: Arc<dyn LoggerProvider>) {
        tracing::debug!(
            "Ignoring an additional logger provider: this factory composes exactly one backend."
        );
    }
}

impl fmt::Debug for LoggerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerFactory").finish_non_exhaustive()
    }
}

impl lucerna::Service for LoggerFactory {}
