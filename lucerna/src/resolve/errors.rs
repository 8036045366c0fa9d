use crate::types::TypeInfo;

/// The errors that can arise while resolving a service.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ResolveError {
    #[error(
        "No component is registered for `{key}` and none of the registration sources can supply one. \
        Register the component, or install a source able to synthesize it, before building the registry."
    )]
    NotRegistered { key: TypeInfo },
    #[error("A dependency cycle was detected while resolving `{key}`: {chain}.")]
    Cycle { key: TypeInfo, chain: String },
    #[error(
        "`{key}` was resolved, but the value that came back is not of the requested type. \
        This is a bug in the component or registration source that supplied it."
    )]
    ValueTypeMismatch { key: TypeInfo },
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

impl ResolveError {
    /// The identity of the service the error is about.
    pub fn key(&self) -> TypeInfo {
        match self {
            ResolveError::NotRegistered { key }
            | ResolveError::Cycle { key, .. }
            | ResolveError::ValueTypeMismatch { key } => *key,
            ResolveError::Construction(e) => e.component(),
        }
    }
}

/// The errors that can arise while constructing a single component instance.
///
/// Every variant names the component (or synthesized service) whose
/// construction failed; the underlying cause is attached as the error
/// source, so the full chain stays inspectable.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConstructionError {
    #[error("A pre-construction hook failed while constructing `{component}`.")]
    Hook {
        component: TypeInfo,
        #[source]
        source: anyhow::Error,
    },
    #[error("`{component}` cannot be constructed: its `{parameter}` parameter failed to resolve.")]
    Parameter {
        component: TypeInfo,
        parameter: TypeInfo,
        #[source]
        source: Box<ResolveError>,
    },
    #[error("The constructor of `{component}` failed.")]
    Constructor {
        component: TypeInfo,
        #[source]
        source: anyhow::Error,
    },
    #[error("The factory delegate registered for `{component}` failed.")]
    Factory {
        component: TypeInfo,
        #[source]
        source: anyhow::Error,
    },
    #[error("The registration synthesized for `{component}` failed to produce an instance.")]
    Synthesized {
        component: TypeInfo,
        #[source]
        source: anyhow::Error,
    },
}

impl ConstructionError {
    /// The identity of the component whose construction failed.
    pub fn component(&self) -> TypeInfo {
        match self {
            ConstructionError::Hook { component, .. }
            | ConstructionError::Parameter { component, .. }
            | ConstructionError::Constructor { component, .. }
            | ConstructionError::Factory { component, .. }
            | ConstructionError::Synthesized { component, .. } => *component,
        }
    }
}
