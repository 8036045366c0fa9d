use std::sync::Arc;

use itertools::Itertools;

use crate::registry::{Activation, ComponentDescriptor, ComponentId, Lifecycle};
use crate::resolve::arguments::{ArgumentList, ResolvedArgs};
use crate::resolve::errors::{ConstructionError, ResolveError};
use crate::resolve::scope::{Cache, CacheKey, Scope};
use crate::resolve::source::SynthesizedRegistration;
use crate::types::{Service, ServiceRequest, SharedService, TypeInfo};

/// The state of one resolution: the scope it runs in, plus the chain of
/// in-flight requests used for cycle detection and error reporting.
///
/// A fresh context is created for every top-level [`Scope::get`] call.
/// Factories, pre-construction hooks and synthesized activators receive the
/// in-flight context instead: whatever they resolve joins the same chain,
/// so cycles through them are caught like any other.
pub struct ResolutionContext<'a> {
    scope: &'a Scope,
    stack: Vec<TypeInfo>,
}

impl<'a> ResolutionContext<'a> {
    pub(crate) fn new(scope: &'a Scope) -> Self {
        Self {
            scope,
            stack: Vec::new(),
        }
    }

    /// The scope this resolution runs in.
    pub fn scope(&self) -> &Scope {
        self.scope
    }

    /// The chain of in-flight requests, outermost first.
    pub fn chain(&self) -> &[TypeInfo] {
        &self.stack
    }

    /// Resolve a service of type `S` as part of the current resolution.
    pub fn get<S: Service>(&mut self) -> Result<Arc<S>, ResolveError> {
        let request = S::request();
        self.resolve(&request)?
            .downcast::<S>()
            .map_err(|_| ResolveError::ValueTypeMismatch {
                key: request.key(),
            })
    }

    /// Resolve a request as part of the current resolution.
    pub fn resolve(&mut self, request: &ServiceRequest) -> Result<SharedService, ResolveError> {
        let key = request.key();
        if self.stack.contains(&key) {
            return Err(self.cycle_error(key));
        }
        self.stack.push(key);
        let outcome = self.resolve_inner(request);
        self.stack.pop();
        outcome
    }

    fn resolve_inner(&mut self, request: &ServiceRequest) -> Result<SharedService, ResolveError> {
        let scope = self.scope;
        if let Some(id) = scope.registry.store().provider_of(request.key()) {
            return self.activate_component(id, request.key());
        }
        for source in scope.registry.sources() {
            if let Some(registration) = source.registrations_for(request) {
                tracing::trace!(
                    key = %request.key(),
                    lifecycle = %registration.lifecycle(),
                    "Binding synthesized by a registration source"
                );
                return self.activate_synthesized(request.key(), registration);
            }
        }
        Err(ResolveError::NotRegistered { key: request.key() })
    }

    fn activate_component(
        &mut self,
        id: ComponentId,
        key: TypeInfo,
    ) -> Result<SharedService, ResolveError> {
        let scope = self.scope;
        let descriptor = &scope.registry.store()[id];
        let instance = match descriptor.lifecycle() {
            Lifecycle::Singleton => self.cached(&scope.singletons, CacheKey::Component(id), |cx| {
                cx.construct(descriptor)
            })?,
            Lifecycle::Scoped => self.cached(&scope.scoped, CacheKey::Component(id), |cx| {
                cx.construct(descriptor)
            })?,
            Lifecycle::Transient => self.construct(descriptor)?,
        };
        if key == descriptor.implementation() {
            return Ok(instance);
        }
        // The request hit one of the component's exposures.
        let Some(exposure) = descriptor.exposure(key) else {
            return Err(ResolveError::ValueTypeMismatch { key });
        };
        match (exposure.project.as_ref())(instance.as_ref()) {
            Some(projected) => Ok(Arc::from(projected)),
            None => Err(ResolveError::ValueTypeMismatch { key }),
        }
    }

    fn activate_synthesized(
        &mut self,
        key: TypeInfo,
        registration: SynthesizedRegistration,
    ) -> Result<SharedService, ResolveError> {
        let scope = self.scope;
        match registration.lifecycle() {
            Lifecycle::Singleton => {
                self.cached(&scope.singletons, CacheKey::Synthesized(key), |cx| {
                    cx.construct_synthesized(key, &registration)
                })
            }
            Lifecycle::Scoped => self.cached(&scope.scoped, CacheKey::Synthesized(key), |cx| {
                cx.construct_synthesized(key, &registration)
            }),
            Lifecycle::Transient => self.construct_synthesized(key, &registration),
        }
    }

    fn cached(
        &mut self,
        cache: &Cache,
        cache_key: CacheKey,
        construct: impl FnOnce(&mut Self) -> Result<SharedService, ResolveError>,
    ) -> Result<SharedService, ResolveError> {
        if let Some(existing) = cache.get(&cache_key) {
            return Ok(existing);
        }
        // Construction recurses into the resolver, so it must happen outside
        // the cache lock. If another thread finished first, its instance
        // wins and ours is dropped.
        let constructed = construct(self)?;
        Ok(cache.insert_or_existing(cache_key, constructed))
    }

    fn construct(&mut self, descriptor: &ComponentDescriptor) -> Result<SharedService, ResolveError> {
        let implementation = descriptor.implementation();
        match descriptor.activation() {
            Activation::Instance(value) => Ok(Arc::clone(value)),
            Activation::Factory(factory) => {
                let built =
                    (factory.as_ref())(self).map_err(|source| ConstructionError::Factory {
                        component: implementation,
                        source,
                    })?;
                Ok(Arc::from(built))
            }
            Activation::Constructor(spec) => {
                let mut arguments = ArgumentList::new();
                for hook in descriptor.hooks() {
                    (hook.as_ref())(self, &mut arguments).map_err(|source| {
                        ConstructionError::Hook {
                            component: implementation,
                            source,
                        }
                    })?;
                }
                let mut args = ResolvedArgs::new();
                for param in spec.params() {
                    match arguments.take(param.key()) {
                        Some(value) => args.push_owned(param.key(), value),
                        None => {
                            let resolved = self.resolve(param.request()).map_err(|source| {
                                ConstructionError::Parameter {
                                    component: implementation,
                                    parameter: param.key(),
                                    source: Box::new(source),
                                }
                            })?;
                            args.push_shared(param.key(), resolved);
                        }
                    }
                }
                let built =
                    (spec.build.as_ref())(&mut args).map_err(|source| {
                        ConstructionError::Constructor {
                            component: implementation,
                            source,
                        }
                    })?;
                Ok(Arc::from(built))
            }
        }
    }

    fn construct_synthesized(
        &mut self,
        key: TypeInfo,
        registration: &SynthesizedRegistration,
    ) -> Result<SharedService, ResolveError> {
        let built =
            registration
                .activate(self)
                .map_err(|source| ConstructionError::Synthesized {
                    component: key,
                    source,
                })?;
        Ok(Arc::from(built))
    }

    fn cycle_error(&self, key: TypeInfo) -> ResolveError {
        let chain = self
            .stack
            .iter()
            .chain(std::iter::once(&key))
            .map(|t| format!("`{t}`"))
            .join(" -> ");
        ResolveError::Cycle { key, chain }
    }
}
