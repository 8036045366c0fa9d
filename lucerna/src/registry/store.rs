use indexmap::IndexMap;
use la_arena::{Arena, Idx};

use crate::registry::ComponentDescriptor;
use crate::types::TypeInfo;

/// A stable identifier for a registered component.
///
/// Ids are handed out in registration order and stay valid for the whole
/// lifetime of the registry built from the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ComponentId(Idx<ComponentDescriptor>);

/// The arena of component descriptors, plus the service index over them.
///
/// The arena gives out cheap, copyable [`ComponentId`] handles. The index
/// maps every service key a component provides (its own type and each of
/// its exposures) to the component that provides it; when several
/// registrations provide the same key, the most recent one wins.
pub(crate) struct ComponentStore {
    arena: Arena<ComponentDescriptor>,
    index: IndexMap<TypeInfo, ComponentId>,
}

impl ComponentStore {
    pub(crate) fn new() -> Self {
        Self {
            arena: Arena::default(),
            index: IndexMap::new(),
        }
    }

    /// Add a descriptor to the store and index every service key it
    /// provides, shadowing earlier providers of the same keys.
    pub(crate) fn alloc(&mut self, descriptor: ComponentDescriptor) -> ComponentId {
        let id = ComponentId(self.arena.alloc(descriptor));
        for key in self.arena[id.0].provides().map(|r| r.key()) {
            self.index.insert(key, id);
        }
        id
    }

    /// The component currently providing `key`, if any.
    pub(crate) fn provider_of(&self, key: TypeInfo) -> Option<ComponentId> {
        self.index.get(&key).copied()
    }

    /// Iterate over all descriptors, in registration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (ComponentId, &ComponentDescriptor)> {
        self.arena.iter().map(|(idx, d)| (ComponentId(idx), d))
    }

    /// Iterate mutably over all descriptors, in registration order.
    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (ComponentId, &mut ComponentDescriptor)> {
        self.arena.iter_mut().map(|(idx, d)| (ComponentId(idx), d))
    }

    pub(crate) fn len(&self) -> usize {
        self.arena.len()
    }
}

impl std::ops::Index<ComponentId> for ComponentStore {
    type Output = ComponentDescriptor;

    fn index(&self, id: ComponentId) -> &Self::Output {
        &self.arena[id.0]
    }
}
