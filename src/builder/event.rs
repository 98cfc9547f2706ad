//! Builder for event declarations.

use crate::core::{Event, Guard, Hook, HookResult, Metadata, TransitionContext};

/// Fluent configuration of one event declaration.
///
/// Obtained through [`StateBuilder::event_with`](crate::builder::StateBuilder::event_with).
pub struct EventBuilder<H, A> {
    name: String,
    transitions_to: String,
    guards: Vec<Guard<H, A>>,
    action: Option<Hook<H, A>>,
    metadata: Metadata,
}

impl<H, A> EventBuilder<H, A> {
    pub(crate) fn new(name: impl Into<String>, transitions_to: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions_to: transitions_to.into(),
            guards: Vec::new(),
            action: None,
            metadata: Metadata::new(),
        }
    }

    /// Add a pre-built guard. Guards are checked in the order they are added.
    pub fn guard(mut self, guard: Guard<H, A>) -> Self {
        self.guards.push(guard);
        self
    }

    /// Add a guard using a closure.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&H, &A) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    /// Add a guard answered by the host's `check_guard`.
    pub fn when_named(self, name: impl Into<String>) -> Self {
        self.guard(Guard::named(name))
    }

    /// Set the inline action. It replaces the host's `run_action` for this event.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut H, &mut TransitionContext<'_, A>) -> HookResult + Send + Sync + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Attach a metadata entry.
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn transitions_to(&self) -> &str {
        &self.transitions_to
    }

    pub(crate) fn guards(&self) -> &[Guard<H, A>] {
        &self.guards
    }

    pub(crate) fn build(self) -> Event<H, A> {
        Event {
            name: self.name,
            transitions_to: self.transitions_to,
            guards: self.guards,
            action: self.action,
            metadata: self.metadata,
        }
    }
}
