//! Builder for state declarations.

use crate::builder::event::EventBuilder;
use crate::core::{HookResult, Metadata, StateHook, TransitionContext};

/// Fluent configuration of one state and the events leaving it.
pub struct StateBuilder<H, A> {
    pub(crate) name: String,
    pub(crate) events: Vec<EventBuilder<H, A>>,
    pub(crate) metadata: Metadata,
    pub(crate) on_entry: Vec<StateHook<H, A>>,
    pub(crate) on_exit: Vec<StateHook<H, A>>,
}

impl<H, A> StateBuilder<H, A> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Vec::new(),
            metadata: Metadata::new(),
            on_entry: Vec::new(),
            on_exit: Vec::new(),
        }
    }

    /// Declare an unguarded event without an inline action.
    pub fn event(self, name: impl Into<String>, transitions_to: impl Into<String>) -> Self {
        self.event_with(name, transitions_to, |event| event)
    }

    /// Declare an event and configure its guards, action and metadata.
    ///
    /// Declaring the same name again adds another candidate; candidates are
    /// tried in declaration order when the event fires.
    pub fn event_with<F>(
        mut self,
        name: impl Into<String>,
        transitions_to: impl Into<String>,
        configure: F,
    ) -> Self
    where
        F: FnOnce(EventBuilder<H, A>) -> EventBuilder<H, A>,
    {
        self.events
            .push(configure(EventBuilder::new(name, transitions_to)));
        self
    }

    /// Attach a metadata entry.
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Run a block whenever this state is entered, after the new state is stored.
    pub fn on_entry<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H, &TransitionContext<'_, A>) -> HookResult + Send + Sync + 'static,
    {
        self.on_entry.push(Box::new(hook));
        self
    }

    /// Run a block whenever this state is left, before the new state is stored.
    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H, &TransitionContext<'_, A>) -> HookResult + Send + Sync + 'static,
    {
        self.on_exit.push(Box::new(hook));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn events_keep_declaration_order() {
        let state = StateBuilder::<(), ()>::new("off")
            .event("turn_on", "on")
            .event_with("turn_on", "low_battery", |e| e.meta("fallback", true))
            .event("break", "broken");

        let names: Vec<&str> = state.events.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["turn_on", "turn_on", "break"]);
        assert_eq!(state.events[1].transitions_to(), "low_battery");
    }

    #[test]
    fn hooks_and_metadata_are_collected() {
        let state = StateBuilder::<(), ()>::new("on")
            .meta("color", "yellow")
            .on_entry(|_, _| Ok(()))
            .on_exit(|_, _| Ok(()))
            .on_exit(|_, _| Ok(()));

        assert_eq!(state.metadata["color"], json!("yellow"));
        assert_eq!(state.on_entry.len(), 1);
        assert_eq!(state.on_exit.len(), 2);
    }
}
