use std::fmt;

/// How instances of a component are cached and shared, once constructed.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Lifecycle {
    /// There is at most one instance for the whole container.
    ///
    /// The first resolution constructs it; every later resolution, from any
    /// scope of the same container, receives the same instance.
    Singleton,
    /// There is at most one instance per resolution scope.
    ///
    /// Resolutions within a scope share the instance. Sibling and child
    /// scopes construct their own.
    Scoped,
    /// A new instance is constructed for every resolution. Never cached.
    Transient,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Lifecycle::Singleton => "singleton",
            Lifecycle::Scoped => "scoped",
            Lifecycle::Transient => "transient",
        };
        write!(f, "{s}")
    }
}
