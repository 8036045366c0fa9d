use std::sync::Arc;

use crate::registry::Lifecycle;
use crate::resolve::ResolutionContext;
use crate::types::{BoxedService, ServiceRequest};

/// The activator of a synthesized registration.
///
/// Runs inside the resolution that triggered the synthesis, so it can
/// resolve further services through the context it is given.
pub type SynthesizedActivator =
    Arc<dyn Fn(&mut ResolutionContext<'_>) -> Result<BoxedService, anyhow::Error> + Send + Sync>;

/// A fallback supplier of service bindings.
///
/// Sources are consulted only after a request has missed every explicit
/// registration: an explicit registration always shadows whatever a source
/// would synthesize. They are tried in installation order and the first one
/// to return a registration wins.
///
/// A source must answer from the request alone. The registry does not cache
/// what a source returns: repeated requests for the same service each go
/// back to the source, and any sharing between them comes from the
/// [`Lifecycle`] of the synthesized registration, applied in the scope that
/// asked.
pub trait RegistrationSource: Send + Sync {
    /// Offer a registration able to satisfy `request`, or `None` to pass.
    fn registrations_for(&self, request: &ServiceRequest) -> Option<SynthesizedRegistration>;
}

/// A binding synthesized on the fly by a [`RegistrationSource`].
pub struct SynthesizedRegistration {
    lifecycle: Lifecycle,
    activator: SynthesizedActivator,
}

impl SynthesizedRegistration {
    /// A synthesized binding with the given lifecycle and activator.
    pub fn new<F>(lifecycle: Lifecycle, activator: F) -> Self
    where
        F: Fn(&mut ResolutionContext<'_>) -> Result<BoxedService, anyhow::Error>
            + Send
            + Sync
            + 'static,
    {
        Self {
            lifecycle,
            activator: Arc::new(activator),
        }
    }

    /// How instances produced by this binding are cached and shared.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub(crate) fn activate(
        &self,
        cx: &mut ResolutionContext<'_>,
    ) -> Result<BoxedService, anyhow::Error> {
        (self.activator.as_ref())(cx)
    }
}

impl std::fmt::Debug for SynthesizedRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesizedRegistration")
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}
