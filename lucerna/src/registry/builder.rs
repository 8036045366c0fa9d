use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use ahash::{HashSet, HashSetExt};
use smallvec::SmallVec;

use crate::registry::component::{
    Activation, BuildFn, ComponentDescriptor, ConstructorSpec, Exposure, FactoryFn, Location,
    ParamSpec, ProjectFn,
};
use crate::registry::store::{ComponentId, ComponentStore};
use crate::registry::{Lifecycle, Registry};
use crate::resolve::{RegistrationSource, ResolutionContext, ResolvedArgs};
use crate::types::{BoxedService, Service, TypeInfo};

/// Observes component registrations when the registry is built.
///
/// Every observer is presented with every registered component exactly once,
/// in registration order, before the registry is frozen. Observers that
/// recognize a component they care about react by attaching pre-construction
/// hooks to it; all other mutations are off the table.
pub trait RegistrationObserver: Send + Sync {
    /// Inspect one component registration and, if it qualifies, attach
    /// hooks to it via [`ComponentDescriptor::attach_hook`].
    fn attach(&self, component: &mut ComponentDescriptor);
}

/// A bundle of registrations, sources and observers that is installed into a
/// [`RegistryBuilder`] as a unit.
pub trait RegistryExtension {
    /// Install this extension's contributions.
    fn install(&self, builder: &mut RegistryBuilder);
}

/// The errors that can arise when freezing a [`RegistryBuilder`] into a
/// [`Registry`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error(
        "`{component}` declares more than one constructor parameter of type `{parameter}` (registered at {registered_at}). \
        Parameters are matched by type when the constructor's arguments are gathered: each declared parameter must have a distinct type."
    )]
    DuplicateParameter {
        component: TypeInfo,
        parameter: TypeInfo,
        registered_at: Location,
    },
}

/// Collects component registrations, registration sources and observers,
/// then freezes them into an immutable [`Registry`].
///
/// ```
/// use lucerna::{Lifecycle, RegistryBuilder, Service};
///
/// #[derive(Clone)]
/// struct Config {
///     retries: u8,
/// }
/// struct Client {
///     config: Config,
/// }
///
/// impl Service for Config {}
/// impl Service for Client {}
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut builder = RegistryBuilder::new();
/// builder.instance(Config { retries: 3 });
/// builder
///     .component::<Client>()
///     .lifecycle(Lifecycle::Singleton)
///     .param::<Config>()
///     .constructor(|args| {
///         Ok(Client {
///             config: args.owned::<Config>()?,
///         })
///     });
/// let registry = builder.build()?;
/// let container = registry.container();
/// assert_eq!(container.get::<Client>()?.config.retries, 3);
/// # Ok(())
/// # }
/// ```
pub struct RegistryBuilder {
    store: ComponentStore,
    sources: Vec<Arc<dyn RegistrationSource>>,
    observers: Vec<Arc<dyn RegistrationObserver>>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self {
            store: ComponentStore::new(),
            sources: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Start registering a component of type `T`.
    ///
    /// The returned [`ComponentBuilder`] must be finished with one of
    /// [`constructor`](ComponentBuilder::constructor),
    /// [`instance`](ComponentBuilder::instance) or
    /// [`factory`](ComponentBuilder::factory); until then, nothing is
    /// recorded.
    ///
    /// Registering the same service type twice is allowed: the most recent
    /// registration wins.
    #[track_caller]
    pub fn component<T: Service>(&mut self) -> ComponentBuilder<'_, T> {
        ComponentBuilder {
            registered_at: Location::caller(),
            builder: self,
            lifecycle: Lifecycle::Transient,
            params: SmallVec::new(),
            exposures: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Register a pre-built instance of `T`.
    ///
    /// Shorthand for `self.component::<T>().instance(value)`.
    #[track_caller]
    pub fn instance<T: Service>(&mut self, value: T) -> ComponentId {
        self.component::<T>().instance(value)
    }

    /// Add a fallback registration source.
    ///
    /// Sources are consulted only when a request misses every explicit
    /// registration, in the order they were added; the first source to
    /// offer a registration wins.
    pub fn add_source(&mut self, source: impl RegistrationSource + 'static) -> &mut Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Add a registration observer.
    ///
    /// Observers run when [`build`](Self::build) is called, in the order
    /// they were added, and see every registered component exactly once.
    pub fn add_observer(&mut self, observer: impl RegistrationObserver + 'static) -> &mut Self {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Install an extension: a pre-packaged set of registrations, sources
    /// and observers.
    pub fn install(&mut self, extension: impl RegistryExtension) -> &mut Self {
        extension.install(self);
        self
    }

    /// Freeze the builder into an immutable [`Registry`].
    ///
    /// This is the point where registrations are validated and observers
    /// run. The resulting registry is a cheaply cloneable handle: derive as
    /// many [containers](Registry::container) from it as you need.
    #[tracing::instrument(name = "build_registry", skip_all)]
    pub fn build(mut self) -> Result<Registry, BuildError> {
        self.validate()?;
        for observer in &self.observers {
            for (_, descriptor) in self.store.iter_mut() {
                observer.attach(descriptor);
            }
        }
        tracing::debug!(
            components = self.store.len(),
            sources = self.sources.len(),
            "Component registry built"
        );
        Ok(Registry::new(self.store, self.sources))
    }

    fn validate(&self) -> Result<(), BuildError> {
        for (_, descriptor) in self.store.iter() {
            let Some(constructor) = descriptor.constructor() else {
                continue;
            };
            let mut seen = HashSet::with_capacity(constructor.params().len());
            for param in constructor.params() {
                if !seen.insert(param.key()) {
                    return Err(BuildError::DuplicateParameter {
                        component: descriptor.implementation(),
                        parameter: param.key(),
                        registered_at: descriptor.registered_at(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// The in-progress registration of a single component.
///
/// Configure the registration with [`lifecycle`](Self::lifecycle),
/// [`param`](Self::param) and [`expose_as`](Self::expose_as), then finish it
/// with one of the activation strategies.
#[must_use = "a component registration does nothing until it is finished with `constructor`, `instance` or `factory`"]
pub struct ComponentBuilder<'a, T: Service> {
    builder: &'a mut RegistryBuilder,
    lifecycle: Lifecycle,
    params: SmallVec<[ParamSpec; 4]>,
    exposures: Vec<Exposure>,
    registered_at: Location,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Service> ComponentBuilder<'_, T> {
    /// Set the component's lifecycle.
    ///
    /// Defaults to [`Lifecycle::Transient`].
    pub fn lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Declare a constructor parameter of type `P`.
    ///
    /// Declared parameters are the component's public construction metadata:
    /// registration observers can inspect them without constructing
    /// anything. When the component is constructed, each parameter is
    /// satisfied either by a pre-construction hook or, failing that, by
    /// resolving `P` in the current scope. Parameters are gathered in
    /// declaration order.
    pub fn param<P: Service>(mut self) -> Self {
        self.params.push(ParamSpec::new(P::request()));
        self
    }

    /// Additionally expose this component under the service type `S`.
    ///
    /// `project` derives the exposed value from the component's concrete
    /// value; it runs on every resolution of `S`. The component itself is
    /// still resolvable under `T`, and its lifecycle governs both.
    pub fn expose_as<S, F>(mut self, project: F) -> Self
    where
        S: Service,
        F: Fn(&T) -> S + Send + Sync + 'static,
    {
        let project: ProjectFn = Arc::new(move |value: &(dyn Any + Send + Sync)| {
            let value = value.downcast_ref::<T>()?;
            Some(Box::new(project(value)) as BoxedService)
        });
        self.exposures.push(Exposure {
            request: S::request(),
            project,
        });
        self
    }

    /// Finish the registration with the component's constructor.
    ///
    /// `build` receives the gathered arguments for the declared parameters;
    /// take them out with [`ResolvedArgs::owned`] or
    /// [`ResolvedArgs::shared`]. Returning an error fails the construction
    /// attempt, and with it the resolution that triggered it.
    pub fn constructor<F>(mut self, build: F) -> ComponentId
    where
        F: Fn(&mut ResolvedArgs) -> Result<T, anyhow::Error> + Send + Sync + 'static,
    {
        let params = std::mem::take(&mut self.params);
        let build: BuildFn = Arc::new(move |args: &mut ResolvedArgs| {
            build(args).map(|component| Box::new(component) as BoxedService)
        });
        self.finish(Activation::Constructor(ConstructorSpec { params, build }))
    }

    /// Finish the registration with a pre-built instance.
    ///
    /// Instance registrations are singletons by construction: every
    /// resolution, from any scope, receives the same value. Any lifecycle
    /// set earlier on this builder is ignored.
    pub fn instance(self, value: T) -> ComponentId {
        self.finish_with(Lifecycle::Singleton, Activation::Instance(Arc::new(value)))
    }

    /// Finish the registration with an opaque factory delegate.
    ///
    /// The delegate may resolve whatever it needs through the
    /// [`ResolutionContext`] it is given, but none of it is declared:
    /// registration observers cannot inspect a factory's dependencies and
    /// pre-construction hooks do not run for it.
    pub fn factory<F>(self, factory: F) -> ComponentId
    where
        F: Fn(&mut ResolutionContext<'_>) -> Result<T, anyhow::Error> + Send + Sync + 'static,
    {
        let factory: FactoryFn = Arc::new(move |cx: &mut ResolutionContext<'_>| {
            factory(cx).map(|component| Box::new(component) as BoxedService)
        });
        self.finish(Activation::Factory(factory))
    }

    fn finish(self, activation: Activation) -> ComponentId {
        let lifecycle = self.lifecycle;
        self.finish_with(lifecycle, activation)
    }

    fn finish_with(self, lifecycle: Lifecycle, activation: Activation) -> ComponentId {
        let descriptor = ComponentDescriptor {
            request: T::request(),
            lifecycle,
            activation,
            exposures: self.exposures,
            hooks: Vec::new(),
            registered_at: self.registered_at,
        };
        self.builder.store.alloc(descriptor)
    }
}
