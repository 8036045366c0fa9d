use lucerna::{
    Lifecycle, RegistrationSource, RequestShape, ResolutionContext, ServiceRequest,
    SynthesizedRegistration, TypeInfo,
};

use crate::errors::LoggerError;
use crate::factory::LoggerFactory;
use crate::logger::Logger;
use crate::typed::LoggerOfFamily;

/// A logger resolution request, reduced to one of the two shapes the
/// integration recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoggerRequest {
    /// The untyped [`Logger`]: resolves to the root (empty) category.
    Root,
    /// A [`LoggerOf`](crate::LoggerOf) request: resolves to the target's
    /// type name as the category.
    Typed {
        /// The type the logger is named after.
        target: TypeInfo,
    },
}

impl LoggerRequest {
    /// Classify a service request.
    ///
    /// Returns `None` for anything that is not a logger request, and for
    /// logger-of-logger requests: a logger named after the logging
    /// abstraction itself is never synthesized.
    pub fn classify(request: &ServiceRequest) -> Option<Self> {
        match request.shape() {
            RequestShape::Plain if request.key().is::<Logger>() => Some(LoggerRequest::Root),
            RequestShape::Generic(generic) if generic.family().is::<LoggerOfFamily>() => {
                if generic.argument().is::<Logger>() {
                    return None;
                }
                Some(LoggerRequest::Typed {
                    target: generic.argument(),
                })
            }
            _ => None,
        }
    }

    /// The category the request resolves to.
    pub fn category(&self) -> &'static str {
        match self {
            LoggerRequest::Root => "",
            LoggerRequest::Typed { target } => target.name(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error(
    "The synthesized payload does not match the requested logger type. This is a bug in the logging integration, please report it."
)]
struct PayloadMismatch;

/// Synthesizes logger bindings on demand.
///
/// Installed by [`LoggerIntegration`](crate::LoggerIntegration). Untyped
/// [`Logger`] requests and typed [`LoggerOf`](crate::LoggerOf) requests
/// that miss every explicit registration are answered with a scoped
/// binding: one logger instance per category per resolution scope.
///
/// The binding resolves the [`LoggerFactory`] when it first runs, so a
/// missing backend fails the resolution that needed the logger, as
/// [`LoggerError::MissingBackend`], naming the category that was asked
/// for.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggerRegistrationSource;

impl LoggerRegistrationSource {
    pub fn new() -> Self {
        Self
    }
}

impl RegistrationSource for LoggerRegistrationSource {
    fn registrations_for(&self, request: &ServiceRequest) -> Option<SynthesizedRegistration> {
        let logger_request = LoggerRequest::classify(request)?;
        let requested = *request;
        Some(SynthesizedRegistration::new(
            Lifecycle::Scoped,
            move |cx: &mut ResolutionContext<'_>| {
                let factory =
                    cx.get::<LoggerFactory>()
                        .map_err(|source| LoggerError::MissingBackend {
                            category: logger_request.category().to_owned(),
                            requester: requested.key(),
                            source,
                        })?;
                let logger = factory.create(logger_request.category());
                match requested.shape() {
                    RequestShape::Plain => Ok(Box::new(logger)),
                    RequestShape::Generic(generic) => generic
                        .wrap(Box::new(logger))
                        .ok_or_else(|| PayloadMismatch.into()),
                }
            },
        ))
    }
}
