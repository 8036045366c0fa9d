//! Service resolution: containers, scopes, the in-flight resolution context
//! and the fallback registration sources consulted on a registry miss.
mod arguments;
mod context;
mod errors;
mod scope;
mod source;

pub use arguments::{ArgError, ArgumentList, ResolvedArgs};
pub use context::ResolutionContext;
pub use errors::{ConstructionError, ResolveError};
pub use scope::{Container, Scope};
pub use source::{RegistrationSource, SynthesizedActivator, SynthesizedRegistration};
