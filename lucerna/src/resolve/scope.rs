use std::sync::{Arc, RwLock};

use ahash::{HashMap, HashMapExt};

use crate::registry::{ComponentId, Registry};
use crate::resolve::context::ResolutionContext;
use crate::resolve::errors::ResolveError;
use crate::types::{Service, SharedService, TypeInfo};

/// The key of one cached instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum CacheKey {
    /// An explicitly registered component.
    Component(ComponentId),
    /// A binding synthesized by a registration source, keyed by the service
    /// it was synthesized for.
    Synthesized(TypeInfo),
}

pub(crate) struct Cache {
    entries: RwLock<HashMap<CacheKey, SharedService>>,
}

impl Cache {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn get(&self, key: &CacheKey) -> Option<SharedService> {
        self.entries
            .read()
            .expect("The lock around the instance cache was poisoned")
            .get(key)
            .cloned()
    }

    /// Insert `value` unless another thread got there first. Either way,
    /// return the instance that ended up cached.
    pub(crate) fn insert_or_existing(&self, key: CacheKey, value: SharedService) -> SharedService {
        self.entries
            .write()
            .expect("The lock around the instance cache was poisoned")
            .entry(key)
            .or_insert(value)
            .clone()
    }
}

/// The resolution entry point derived from a [`Registry`].
///
/// A container owns a singleton universe: every [`Lifecycle::Singleton`]
/// component is constructed at most once per container, no matter how many
/// scopes resolve it. Two containers derived from the same registry share
/// nothing.
///
/// The container doubles as its own root scope: [`get`](Self::get) resolves
/// there, [`scope`](Self::scope) opens a child.
///
/// Cloning a container is cheap and yields a handle to the *same* container.
///
/// [`Lifecycle::Singleton`]: crate::Lifecycle::Singleton
#[derive(Clone)]
pub struct Container {
    root: Scope,
}

impl Container {
    /// Create a fresh container over `registry`.
    pub fn new(registry: Registry) -> Self {
        Self {
            root: Scope {
                registry,
                singletons: Arc::new(Cache::new()),
                scoped: Arc::new(Cache::new()),
            },
        }
    }

    /// Resolve a service of type `S` in the container's root scope.
    pub fn get<S: Service>(&self) -> Result<Arc<S>, ResolveError> {
        self.root.get::<S>()
    }

    /// Open a new scope, childed to the container's root scope.
    pub fn scope(&self) -> Scope {
        self.root.child()
    }

    /// The container's root scope.
    pub fn root(&self) -> &Scope {
        &self.root
    }

    /// The registry this container resolves against.
    pub fn registry(&self) -> &Registry {
        &self.root.registry
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("registry", &self.root.registry)
            .finish_non_exhaustive()
    }
}

/// A resolution scope: the unit of sharing for [`Lifecycle::Scoped`]
/// components.
///
/// Every resolution happens in some scope. Resolutions within one scope
/// share its scoped instances; sibling and child scopes construct their
/// own. Scopes nest arbitrarily deep via [`child`](Self::child) and go away
/// when dropped, taking their scoped instances with them (unless something
/// else still holds a handle).
///
/// Cloning a scope is cheap and yields a handle to the *same* scope.
///
/// [`Lifecycle::Scoped`]: crate::Lifecycle::Scoped
#[derive(Clone)]
pub struct Scope {
    pub(crate) registry: Registry,
    pub(crate) singletons: Arc<Cache>,
    pub(crate) scoped: Arc<Cache>,
}

impl Scope {
    /// Open a child scope.
    ///
    /// The child shares the container's singletons and starts with an empty
    /// scoped cache of its own. The parent is unaffected by anything the
    /// child constructs.
    pub fn child(&self) -> Scope {
        Scope {
            registry: self.registry.clone(),
            singletons: Arc::clone(&self.singletons),
            scoped: Arc::new(Cache::new()),
        }
    }

    /// Resolve a service of type `S` in this scope.
    ///
    /// The request is matched against explicit registrations first; on a
    /// miss, the registration sources are consulted in installation order.
    pub fn get<S: Service>(&self) -> Result<Arc<S>, ResolveError> {
        let request = S::request();
        let mut cx = ResolutionContext::new(self);
        cx.resolve(&request)?
            .downcast::<S>()
            .map_err(|_| ResolveError::ValueTypeMismatch {
                key: request.key(),
            })
    }

    /// The registry this scope resolves against.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
