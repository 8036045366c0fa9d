use std::any::Any;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::registry::Lifecycle;
use crate::resolve::{ArgumentList, ResolutionContext, ResolvedArgs};
use crate::types::{BoxedService, ServiceRequest, SharedService, TypeInfo};

/// A pre-construction hook attached to a component registration.
///
/// Hooks run before the component's constructor, on every construction
/// attempt, in the order they were attached. They receive the resolution
/// context and the in-flight [`ArgumentList`] and may append additional
/// typed arguments to it. An error aborts the construction attempt.
pub type InjectionHook = Arc<
    dyn Fn(&mut ResolutionContext<'_>, &mut ArgumentList) -> Result<(), anyhow::Error>
        + Send
        + Sync,
>;

/// The build closure of a constructor-activated component.
pub(crate) type BuildFn =
    Arc<dyn Fn(&mut ResolvedArgs) -> Result<BoxedService, anyhow::Error> + Send + Sync>;

/// The delegate of a factory-activated component.
pub(crate) type FactoryFn =
    Arc<dyn Fn(&mut ResolutionContext<'_>) -> Result<BoxedService, anyhow::Error> + Send + Sync>;

/// Projects a component's concrete value onto one of its exposed services.
///
/// Returns `None` if the value is not of the component's concrete type.
pub(crate) type ProjectFn =
    Arc<dyn Fn(&(dyn Any + Send + Sync)) -> Option<BoxedService> + Send + Sync>;

/// The exact location, in the registering crate's source code, where a
/// component was registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    /// The line number, starting at 1.
    pub line: u32,
    /// The column number, starting at 1.
    pub column: u32,
    /// The name of the source file.
    ///
    /// See [`std::panic::Location::file`] for more details.
    pub file: &'static str,
}

impl From<&'static std::panic::Location<'static>> for Location {
    fn from(l: &'static std::panic::Location<'static>) -> Self {
        Self {
            line: l.line(),
            column: l.column(),
            file: l.file(),
        }
    }
}

impl Location {
    #[track_caller]
    pub(crate) fn caller() -> Self {
        std::panic::Location::caller().into()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A constructor parameter, declared when the component was registered.
#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    request: ServiceRequest,
}

impl ParamSpec {
    pub(crate) fn new(request: ServiceRequest) -> Self {
        Self { request }
    }

    /// The request used to satisfy this parameter when it is not supplied
    /// by a pre-construction hook.
    pub fn request(&self) -> &ServiceRequest {
        &self.request
    }

    /// The identity of the parameter's type.
    pub fn key(&self) -> TypeInfo {
        self.request.key()
    }
}

/// The declared constructor of a component: its parameters, in declaration
/// order, and the closure that builds the component out of them.
pub struct ConstructorSpec {
    pub(crate) params: SmallVec<[ParamSpec; 4]>,
    pub(crate) build: BuildFn,
}

impl ConstructorSpec {
    /// The declared parameters, in declaration order.
    ///
    /// This is the metadata registration observers inspect: a component's
    /// parameters are known without constructing it.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }
}

impl fmt::Debug for ConstructorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorSpec")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// How a component is activated when an instance is needed.
pub enum Activation {
    /// Invoke the declared constructor with the gathered arguments.
    Constructor(ConstructorSpec),
    /// Hand out a pre-built instance supplied at registration time.
    Instance(SharedService),
    /// Invoke an opaque delegate.
    ///
    /// Factories carry no parameter metadata: whatever they resolve, they
    /// resolve internally, through the [`ResolutionContext`] they are given.
    Factory(FactoryFn),
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activation::Constructor(spec) => f.debug_tuple("Constructor").field(spec).finish(),
            Activation::Instance(_) => f.write_str("Instance(..)"),
            Activation::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// An additional service a component is exposed under, with the projection
/// that derives the service value from the component's concrete value.
pub struct Exposure {
    pub(crate) request: ServiceRequest,
    pub(crate) project: ProjectFn,
}

impl Exposure {
    /// The request this exposure satisfies.
    pub fn request(&self) -> &ServiceRequest {
        &self.request
    }
}

/// Everything the registry knows about a registered component.
///
/// Descriptors are assembled by
/// [`RegistryBuilder`](crate::registry::RegistryBuilder), presented once to
/// every registration observer when the registry is built, and immutable
/// afterwards. Observers are the only party that gets to mutate them, and
/// the only mutation on offer is [`attach_hook`](Self::attach_hook).
pub struct ComponentDescriptor {
    pub(crate) request: ServiceRequest,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) activation: Activation,
    pub(crate) exposures: Vec<Exposure>,
    pub(crate) hooks: Vec<InjectionHook>,
    pub(crate) registered_at: Location,
}

impl ComponentDescriptor {
    /// The identity of the concrete type this component is implemented by.
    pub fn implementation(&self) -> TypeInfo {
        self.request.key()
    }

    /// The request shape under which the component registers itself.
    pub fn self_request(&self) -> &ServiceRequest {
        &self.request
    }

    /// How instances of this component are cached and shared.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// How this component is activated.
    pub fn activation(&self) -> &Activation {
        &self.activation
    }

    /// The declared constructor, if the component is constructor-activated.
    pub fn constructor(&self) -> Option<&ConstructorSpec> {
        match &self.activation {
            Activation::Constructor(spec) => Some(spec),
            _ => None,
        }
    }

    /// Every service request this component satisfies: its own type first,
    /// followed by its registered exposures.
    pub fn provides(&self) -> impl Iterator<Item = &ServiceRequest> + '_ {
        std::iter::once(&self.request).chain(self.exposures.iter().map(|e| &e.request))
    }

    /// Where the component was registered.
    pub fn registered_at(&self) -> Location {
        self.registered_at
    }

    /// Attach a pre-construction hook.
    ///
    /// Hooks run in attachment order. Arguments appended by earlier hooks
    /// take precedence over later ones when the constructor's parameters
    /// are gathered.
    pub fn attach_hook(&mut self, hook: InjectionHook) {
        self.hooks.push(hook);
    }

    /// The attached pre-construction hooks, in attachment order.
    pub fn hooks(&self) -> &[InjectionHook] {
        &self.hooks
    }

    pub(crate) fn exposure(&self, key: TypeInfo) -> Option<&Exposure> {
        self.exposures.iter().find(|e| e.request.key() == key)
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("implementation", &self.implementation())
            .field("lifecycle", &self.lifecycle)
            .field("activation", &self.activation)
            .field("hooks", &self.hooks.len())
            .field("registered_at", &self.registered_at)
            .finish_non_exhaustive()
    }
}
