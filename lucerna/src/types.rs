//! The vocabulary shared by registration and resolution: type identities,
//! service requests and the [`Service`] trait implemented by everything a
//! registry can hand out.
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A type-erased service value, as produced by constructors, factories and
/// registration sources.
pub type BoxedService = Box<dyn Any + Send + Sync>;

/// A type-erased service value behind a shared handle, as stored in the
/// per-scope caches and handed out by the resolver.
pub type SharedService = Arc<dyn Any + Send + Sync>;

/// The runtime identity of a Rust type: its [`TypeId`] paired with the
/// fully-qualified name used in diagnostics.
///
/// Two `TypeInfo`s compare equal if and only if they identify the same type.
/// The name plays no part in comparisons, it is there for error messages and
/// for consumers that derive information from it (e.g. logger categories).
#[derive(Clone, Copy, Debug)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// Capture the identity of `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The [`TypeId`] of the identified type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The fully-qualified name of the identified type, as reported by
    /// [`std::any::type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this is the identity of `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A resolution request, as seen by the registry and by registration sources.
///
/// Requests are assembled statically, by [`Service::request`], at a point
/// where the concrete service type is known. Their [shape](RequestShape)
/// is the only structure a registration source gets to inspect: there is no
/// runtime reflection to recover it from, so a type that wants sources to
/// see inside it must say so in its `Service` implementation.
#[derive(Clone, Copy, Debug)]
pub struct ServiceRequest {
    key: TypeInfo,
    shape: RequestShape,
}

impl ServiceRequest {
    /// A plain request for `T`, with no further structure.
    pub fn plain<T: 'static>() -> Self {
        Self {
            key: TypeInfo::of::<T>(),
            shape: RequestShape::Plain,
        }
    }

    /// A request for `T`, where `T` is the instantiation of a generic family.
    ///
    /// `family` identifies the generic type constructor independently of its
    /// argument (by convention, a dedicated marker type), `argument` is the
    /// type the family is instantiated with. `wrap` converts the family's
    /// payload into the concrete `T`: it is captured here because this is
    /// the one place where `T` is statically known.
    pub fn generic<T: 'static>(family: TypeInfo, argument: TypeInfo, wrap: WrapFn) -> Self {
        Self {
            key: TypeInfo::of::<T>(),
            shape: RequestShape::Generic(GenericRequest {
                family,
                argument,
                wrap,
            }),
        }
    }

    /// The identity of the requested service type.
    pub fn key(&self) -> TypeInfo {
        self.key
    }

    /// The static structure of the request.
    pub fn shape(&self) -> &RequestShape {
        &self.shape
    }
}

/// The static structure of a [`ServiceRequest`].
#[derive(Clone, Copy, Debug)]
pub enum RequestShape {
    /// A non-generic service, identified by its key alone.
    Plain,
    /// An instantiation of a generic family, with the argument extracted.
    Generic(GenericRequest),
}

/// Converts a generic family's payload into the concrete requested value.
///
/// Returns `None` if the payload is not of the type the family produces.
pub type WrapFn = fn(BoxedService) -> Option<BoxedService>;

/// The generic half of a [`ServiceRequest`]: which family was instantiated,
/// with which argument, and how to package the family's payload as the
/// concrete requested value.
#[derive(Clone, Copy)]
pub struct GenericRequest {
    family: TypeInfo,
    argument: TypeInfo,
    wrap: WrapFn,
}

impl GenericRequest {
    /// The marker identifying the generic family.
    pub fn family(&self) -> TypeInfo {
        self.family
    }

    /// The type the family was instantiated with.
    pub fn argument(&self) -> TypeInfo {
        self.argument
    }

    /// Convert the family's payload into the concrete requested value.
    ///
    /// Returns `None` if `payload` is not of the type the family produces.
    pub fn wrap(&self, payload: BoxedService) -> Option<BoxedService> {
        (self.wrap)(payload)
    }
}

impl fmt::Debug for GenericRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericRequest")
            .field("family", &self.family)
            .field("argument", &self.argument)
            .finish_non_exhaustive()
    }
}

/// Implemented by every type that can be registered with, or resolved from,
/// a registry.
///
/// For almost all types the provided [`request`](Service::request) default
/// is the right one: a plain request keyed by the type itself.
///
/// ```
/// use lucerna::Service;
///
/// struct EmailDispatcher;
///
/// impl Service for EmailDispatcher {}
/// ```
///
/// Generic families that participate in on-demand synthesis override
/// [`request`](Service::request) to report their structure to registration
/// sources.
pub trait Service: Send + Sync + Sized + 'static {
    /// How this type presents itself to the resolver and to registration
    /// sources.
    fn request() -> ServiceRequest {
        ServiceRequest::plain::<Self>()
    }
}
