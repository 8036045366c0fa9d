//! # Lucerna - API reference
//!
//! Lucerna is a compact component registry: you declare your components,
//! their constructors and their lifecycles up front, freeze the lot into an
//! immutable [`Registry`], then resolve services out of [scopes](Scope).
//!
//! Beyond plain registrations it supports:
//!
//! - [registration sources](RegistrationSource), consulted when a request
//!   misses every explicit registration, to synthesize bindings on demand;
//! - [registration observers](RegistrationObserver), which inspect every
//!   registration at build time and attach
//!   [pre-construction hooks](InjectionHook) to the ones they recognize;
//! - [exposures](registry::ComponentBuilder::expose_as), to offer one
//!   component under several service types.
//!
//! ```
//! use lucerna::{Lifecycle, RegistryBuilder, Service};
//!
//! #[derive(Clone)]
//! struct Clock;
//! struct Audit {
//!     clock: Clock,
//! }
//!
//! impl Service for Clock {}
//! impl Service for Audit {}
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = RegistryBuilder::new();
//! builder
//!     .component::<Clock>()
//!     .lifecycle(Lifecycle::Singleton)
//!     .constructor(|_| Ok(Clock));
//! builder
//!     .component::<Audit>()
//!     .lifecycle(Lifecycle::Scoped)
//!     .param::<Clock>()
//!     .constructor(|args| {
//!         Ok(Audit {
//!             clock: args.owned::<Clock>()?,
//!         })
//!     });
//! let container = builder.build()?.container();
//!
//! // `Audit` is scoped: the same instance within a scope, a fresh one per
//! // sibling scope. The `Clock` inside is a container-wide singleton.
//! let scope = container.scope();
//! let audit = scope.get::<Audit>()?;
//! # let _ = audit;
//! # Ok(())
//! # }
//! ```
pub mod registry;
pub mod resolve;
mod types;

pub use registry::{
    Activation, BuildError, ComponentBuilder, ComponentDescriptor, ComponentId, ConstructorSpec,
    Exposure, InjectionHook, Lifecycle, Location, ParamSpec, RegistrationObserver, Registry,
    RegistryBuilder, RegistryExtension,
};
pub use resolve::{
    ArgError, ArgumentList, ConstructionError, Container, RegistrationSource, ResolutionContext,
    ResolveError, ResolvedArgs, Scope, SynthesizedActivator, SynthesizedRegistration,
};
pub use types::{
    BoxedService, GenericRequest, RequestShape, Service, ServiceRequest, SharedService, TypeInfo,
    WrapFn,
};
