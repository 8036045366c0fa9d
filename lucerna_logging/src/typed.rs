use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use lucerna::{BoxedService, Service, ServiceRequest, TypeInfo};

use crate::logger::Logger;

/// Marker identifying the `LoggerOf` family in service requests,
/// independent of the type argument.
pub(crate) struct LoggerOfFamily;

/// A [`Logger`] bound to the category of `T`.
///
/// Requesting `LoggerOf<T>`, directly or as a constructor parameter,
/// synthesizes a logger whose category is `std::any::type_name::<T>()`.
/// No per-`T` registration is required. The handle dereferences to
/// [`Logger`], so the full logging surface is available on it.
pub struct LoggerOf<T> {
    inner: Logger,
    _target: PhantomData<fn() -> T>,
}

impl<T: 'static> LoggerOf<T> {
    /// Bind an existing handle as the typed logger for `T`.
    ///
    /// The handle's category is taken as-is. Resolving through a registry
    /// is what ties the category to `T`'s type name.
    pub fn new(inner: Logger) -> Self {
        Self {
            inner,
            _target: PhantomData,
        }
    }

    /// The identity of the type this logger is named after.
    pub fn target() -> TypeInfo {
        TypeInfo::of::<T>()
    }

    /// Unwrap the underlying untyped handle.
    pub fn into_inner(self) -> Logger {
        self.inner
    }
}

impl<T> Clone for LoggerOf<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _target: PhantomData,
        }
    }
}

impl<T> Deref for LoggerOf<T> {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        &self.inner
    }
}

impl<T> fmt::Debug for LoggerOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerOf")
            .field("category", &self.inner.category())
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Service for LoggerOf<T> {
    fn request() -> ServiceRequest {
        ServiceRequest::generic::<Self>(
            TypeInfo::of::<LoggerOfFamily>(),
            TypeInfo::of::<T>(),
            wrap::<T>,
        )
    }
}

fn wrap<T: 'static>(payload: BoxedService) -> Option<BoxedService> {
    let logger = payload.downcast::<Logger>().ok()?;
    Some(Box::new(LoggerOf::<T>::new(*logger)))
}
