//! Events: named, state-scoped edges of the specification graph.

use super::guard::Guard;
use super::hook::Hook;
use super::Metadata;
use crate::host::HostBinding;
use std::fmt;

/// An edge leaving one state.
///
/// The same event name may be declared several times within a state; each
/// declaration carries its own guards and target, and the first whose guards
/// all pass is selected when the event fires.
pub struct Event<H, A> {
    pub(crate) name: String,
    pub(crate) transitions_to: String,
    pub(crate) guards: Vec<Guard<H, A>>,
    pub(crate) action: Option<Hook<H, A>>,
    pub(crate) metadata: Metadata,
}

impl<H, A> Event<H, A> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the target state.
    pub fn transitions_to(&self) -> &str {
        &self.transitions_to
    }

    pub fn guards(&self) -> &[Guard<H, A>] {
        &self.guards
    }

    /// Whether an inline action was declared.
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub(crate) fn action(&self) -> Option<&Hook<H, A>> {
        self.action.as_ref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Check every guard in declaration order; an empty guard list passes.
    pub fn permits(&self, host: &H, args: &A) -> bool
    where
        H: HostBinding<A>,
    {
        self.guards.iter().all(|guard| guard.check(host, args))
    }
}

impl<H, A> fmt::Debug for Event<H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("transitions_to", &self.transitions_to)
            .field("guards", &self.guards)
            .field("has_action", &self.action.is_some())
            .field("metadata", &self.metadata)
            .finish()
    }
}
