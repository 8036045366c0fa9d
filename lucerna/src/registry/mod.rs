//! Component registration: the builder DSL, the component descriptors it
//! produces and the frozen [`Registry`] everything resolves against.
use std::sync::Arc;

use crate::resolve::{Container, RegistrationSource};
use crate::types::TypeInfo;

mod builder;
mod component;
mod lifecycle;
mod store;

pub use builder::{
    BuildError, ComponentBuilder, RegistrationObserver, RegistryBuilder, RegistryExtension,
};
pub use component::{
    Activation, ComponentDescriptor, ConstructorSpec, Exposure, InjectionHook, Location, ParamSpec,
};
pub use lifecycle::Lifecycle;
pub use store::ComponentId;

pub(crate) use store::ComponentStore;

/// The immutable outcome of [`RegistryBuilder::build`]: every component
/// descriptor, with its hooks attached, plus the fallback registration
/// sources.
///
/// A `Registry` is configuration, not state: it holds no instances. Derive a
/// [`Container`] from it to start resolving. Cloning is cheap and all clones
/// share the same storage.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    store: ComponentStore,
    sources: Vec<Arc<dyn RegistrationSource>>,
}

impl Registry {
    pub(crate) fn new(store: ComponentStore, sources: Vec<Arc<dyn RegistrationSource>>) -> Self {
        Self {
            inner: Arc::new(RegistryInner { store, sources }),
        }
    }

    /// Create a fresh [`Container`] over this registry.
    ///
    /// Each container has its own singleton universe: two containers derived
    /// from the same registry never share instances.
    pub fn container(&self) -> Container {
        Container::new(self.clone())
    }

    /// The descriptor of a registered component.
    pub fn component(&self, id: ComponentId) -> &ComponentDescriptor {
        &self.inner.store[id]
    }

    /// Iterate over all registered components, in registration order.
    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &ComponentDescriptor)> {
        self.inner.store.iter()
    }

    /// The component currently providing `key`, taking shadowing into
    /// account, if any. Registration sources are not consulted.
    pub fn provider_of(&self, key: TypeInfo) -> Option<ComponentId> {
        self.inner.store.provider_of(key)
    }

    /// The number of registered components.
    pub fn len(&self) -> usize {
        self.inner.store.len()
    }

    /// Returns `true` if no components were registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn store(&self) -> &ComponentStore {
        &self.inner.store
    }

    pub(crate) fn sources(&self) -> &[Arc<dyn RegistrationSource>] {
        &self.inner.sources
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("components", &self.len())
            .field("sources", &self.inner.sources.len())
            .finish()
    }
}
