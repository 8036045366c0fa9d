use std::sync::Arc;

use smallvec::SmallVec;

use crate::types::{BoxedService, Service, SharedService, TypeInfo};

/// The in-flight argument set of one construction attempt, as assembled by
/// pre-construction hooks.
///
/// Hooks append to the tail. When the constructor's parameters are gathered,
/// the list is scanned front-to-back and the first entry of the right type
/// is taken, so arguments contributed by earlier hooks shadow later ones.
/// Whatever is left over once every declared parameter is satisfied is
/// discarded.
#[derive(Default)]
pub struct ArgumentList {
    entries: SmallVec<[(TypeInfo, BoxedService); 2]>,
}

impl ArgumentList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a typed argument to the tail of the list.
    pub fn append<P: Service>(&mut self, value: P) {
        self.entries.push((TypeInfo::of::<P>(), Box::new(value)));
    }

    /// Returns `true` if the list already carries an argument of type `P`.
    pub fn contains<P: Service>(&self) -> bool {
        let key = TypeInfo::of::<P>();
        self.entries.iter().any(|(k, _)| *k == key)
    }

    /// The number of arguments currently in the list.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no hook has appended anything.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return the first argument with the given key, if any.
    pub(crate) fn take(&mut self, key: TypeInfo) -> Option<BoxedService> {
        let position = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(position).1)
    }
}

enum ArgValue {
    /// Supplied by a pre-construction hook. Owned outright.
    Owned(BoxedService),
    /// Resolved from the scope. Shared with whatever else holds the handle.
    Shared(SharedService),
}

/// The gathered arguments of one construction attempt, one slot per declared
/// parameter, handed to the component's build closure.
///
/// Each slot can be taken exactly once, with [`owned`](Self::owned) or
/// [`shared`](Self::shared).
pub struct ResolvedArgs {
    entries: SmallVec<[(TypeInfo, Option<ArgValue>); 4]>,
}

impl ResolvedArgs {
    pub(crate) fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    pub(crate) fn push_owned(&mut self, key: TypeInfo, value: BoxedService) {
        self.entries.push((key, Some(ArgValue::Owned(value))));
    }

    pub(crate) fn push_shared(&mut self, key: TypeInfo, value: SharedService) {
        self.entries.push((key, Some(ArgValue::Shared(value))));
    }

    /// Take the argument declared for `P` by value.
    ///
    /// Arguments supplied by hooks are moved out; arguments resolved from
    /// the scope live behind a shared handle and are cloned out of it.
    pub fn owned<P: Service + Clone>(&mut self) -> Result<P, ArgError> {
        let parameter = TypeInfo::of::<P>();
        match self.take_slot(parameter)? {
            ArgValue::Owned(boxed) => boxed
                .downcast::<P>()
                .map(|boxed| *boxed)
                .map_err(|_| ArgError::TypeMismatch { parameter }),
            ArgValue::Shared(shared) => shared
                .downcast::<P>()
                .map(|shared| shared.as_ref().clone())
                .map_err(|_| ArgError::TypeMismatch { parameter }),
        }
    }

    /// Take the argument declared for `P` behind a shared handle.
    ///
    /// Unlike [`owned`](Self::owned), this never clones the underlying
    /// value and puts no `Clone` bound on `P`.
    pub fn shared<P: Service>(&mut self) -> Result<Arc<P>, ArgError> {
        let parameter = TypeInfo::of::<P>();
        match self.take_slot(parameter)? {
            ArgValue::Owned(boxed) => boxed
                .downcast::<P>()
                .map(|boxed| Arc::new(*boxed))
                .map_err(|_| ArgError::TypeMismatch { parameter }),
            ArgValue::Shared(shared) => shared
                .downcast::<P>()
                .map_err(|_| ArgError::TypeMismatch { parameter }),
        }
    }

    fn take_slot(&mut self, parameter: TypeInfo) -> Result<ArgValue, ArgError> {
        let slot = self
            .entries
            .iter_mut()
            .find(|(k, _)| *k == parameter)
            .map(|(_, v)| v)
            .ok_or(ArgError::Undeclared { parameter })?;
        slot.take().ok_or(ArgError::AlreadyTaken { parameter })
    }
}

/// The errors that can arise when a build closure takes its arguments out of
/// [`ResolvedArgs`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ArgError {
    #[error(
        "The constructor asked for a `{parameter}` argument, but no parameter of that type was \
        declared when the component was registered. Declare the parameter on the registration."
    )]
    Undeclared { parameter: TypeInfo },
    #[error(
        "The constructor asked for its `{parameter}` argument more than once. \
        Each argument can be taken exactly once."
    )]
    AlreadyTaken { parameter: TypeInfo },
    #[error(
        "The value gathered for the `{parameter}` parameter is not of the expected type. \
        This is a bug in the hook or registration that supplied it."
    )]
    TypeMismatch { parameter: TypeInfo },
}
