use std::sync::Arc;

use lucerna::{
    ArgumentList, ComponentDescriptor, RegistrationObserver, RequestShape, ResolutionContext,
};

use crate::errors::LoggerError;
use crate::factory::LoggerFactory;
use crate::logger::Logger;
use crate::typed::LoggerOfFamily;

/// Wires logger injection into qualifying component registrations, at
/// registry build time.
///
/// A component qualifies when all of the following hold:
///
/// - it does not itself provide the logging abstraction: a component that
///   *is* a logger, or is exposed as one, never receives an injected
///   logger, which is also what keeps logger construction from recursing;
/// - it is constructor-activated, so its parameters are declared metadata;
///   instance and factory registrations are skipped;
/// - at least one declared parameter is the plain [`Logger`] type.
///
/// Qualifying components get a pre-construction hook that creates a logger
/// named after the component's own concrete type and appends it to the
/// in-flight arguments. The category comes from the component under
/// construction, never from whoever requested it. Typed
/// [`LoggerOf`](crate::LoggerOf) parameters are left alone: they resolve
/// through [`LoggerRegistrationSource`](crate::LoggerRegistrationSource)
/// like any other dependency.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggerInjector;

impl LoggerInjector {
    pub fn new() -> Self {
        Self
    }
}

impl RegistrationObserver for LoggerInjector {
    fn attach(&self, component: &mut ComponentDescriptor) {
        if provides_logging(component) {
            return;
        }
        let Some(constructor) = component.constructor() else {
            return;
        };
        if !constructor
            .params()
            .iter()
            .any(|param| param.key().is::<Logger>())
        {
            return;
        }
        let implementation = component.implementation();
        tracing::trace!(
            component = implementation.name(),
            "Attaching logger injection"
        );
        component.attach_hook(Arc::new(
            move |cx: &mut ResolutionContext<'_>, arguments: &mut ArgumentList| {
                let category = implementation.name();
                let factory =
                    cx.get::<LoggerFactory>()
                        .map_err(|source| LoggerError::MissingBackend {
                            category: category.to_owned(),
                            requester: implementation,
                            source,
                        })?;
                arguments.append(factory.create(category));
                Ok(())
            },
        ));
    }
}

fn provides_logging(component: &ComponentDescriptor) -> bool {
    component.provides().any(|request| {
        if request.key().is::<Logger>() {
            return true;
        }
        matches!(
            request.shape(),
            RequestShape::Generic(generic) if generic.family().is::<LoggerOfFamily>()
        )
    })
}
