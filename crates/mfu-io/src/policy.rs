//! Policy provider context.
//!
//! The upload form finds its policy provider through Dioxus context:
//! the host calls `use_context_provider(|| PolicyHandle::new(service))`
//! somewhere above the form.

use std::fmt;
use std::rc::Rc;

use mfu_form::PolicyProvider;

/// Shared handle to the page's policy provider.
#[derive(Clone)]
pub struct PolicyHandle(Rc<dyn PolicyProvider>);

impl PolicyHandle {
    /// Wrap `provider` for use as Dioxus context.
    #[must_use]
    pub fn new(provider: impl PolicyProvider + 'static) -> Self {
        Self(Rc::new(provider))
    }

    /// The wrapped provider.
    #[must_use]
    pub fn provider(&self) -> &dyn PolicyProvider {
        &*self.0
    }
}

impl fmt::Debug for PolicyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyHandle").finish_non_exhaustive()
    }
}
