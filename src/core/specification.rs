//! The compiled, read-only state graph.

use super::error::UnknownStateError;
use super::event::Event;
use super::graph::{EventEdge, SpecificationGraph, StateNode};
use super::hook::{ErrorHook, Hook, StateHook};
use super::state::State;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Immutable state graph shared by every host of one type.
///
/// Built once by [`SpecificationBuilder`](crate::builder::SpecificationBuilder)
/// and never mutated afterwards, so it can be wrapped in an `Arc` and shared
/// across hosts and threads without locking. The first declared state is the
/// initial state.
pub struct Specification<H, A = ()> {
    pub(crate) states: Vec<State<H, A>>,
    pub(crate) index: HashMap<String, usize>,
    pub(crate) before_transition: Vec<Hook<H, A>>,
    pub(crate) on_transition: Vec<StateHook<H, A>>,
    pub(crate) after_transition: Vec<StateHook<H, A>>,
    pub(crate) on_entry: Vec<StateHook<H, A>>,
    pub(crate) on_exit: Vec<StateHook<H, A>>,
    pub(crate) on_error: Vec<ErrorHook<H, A>>,
}

impl<H, A> Specification<H, A> {
    /// The first declared state.
    pub fn initial_state(&self) -> &State<H, A> {
        // the builder rejects empty specifications
        &self.states[0]
    }

    /// All states in definition order.
    pub fn states(&self) -> &[State<H, A>] {
        &self.states
    }

    /// State names in definition order.
    pub fn state_names(&self) -> Vec<&str> {
        self.states.iter().map(State::name).collect()
    }

    pub fn state(&self, name: &str) -> Result<&State<H, A>, UnknownStateError> {
        self.index
            .get(name)
            .map(|&ordinal| &self.states[ordinal])
            .ok_or_else(|| UnknownStateError::new(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Events declared on `state`, possibly empty.
    pub fn events_of(&self, state: &str) -> Result<&[Event<H, A>], UnknownStateError> {
        self.state(state).map(State::events)
    }

    /// Every event name declared on any state.
    pub fn event_names(&self) -> BTreeSet<&str> {
        self.states
            .iter()
            .flat_map(|state| state.events.iter().map(Event::name))
            .collect()
    }

    pub fn ordinal(&self, state: &str) -> Result<usize, UnknownStateError> {
        self.state(state).map(State::ordinal)
    }

    /// Compare two states by definition order.
    pub fn compare(&self, a: &str, b: &str) -> Result<Ordering, UnknownStateError> {
        Ok(self.ordinal(a)?.cmp(&self.ordinal(b)?))
    }

    /// Whether an `on_error` hook is registered.
    pub fn handles_errors(&self) -> bool {
        !self.on_error.is_empty()
    }

    /// Snapshot of states and edges for diagram renderers.
    pub fn graph(&self) -> SpecificationGraph {
        let states = self
            .states
            .iter()
            .map(|state| StateNode {
                name: state.name.clone(),
                ordinal: state.ordinal,
                metadata: state.metadata.clone(),
                events: state
                    .events
                    .iter()
                    .map(|event| EventEdge {
                        name: event.name.clone(),
                        transitions_to: event.transitions_to.clone(),
                        guards: event.guards.len(),
                        has_action: event.has_action(),
                        metadata: event.metadata.clone(),
                    })
                    .collect(),
            })
            .collect();

        SpecificationGraph {
            initial: self.initial_state().name.clone(),
            states,
        }
    }
}

impl<H, A> fmt::Debug for Specification<H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("states", &self.states)
            .field("before_transition", &self.before_transition.len())
            .field("on_transition", &self.on_transition.len())
            .field("after_transition", &self.after_transition.len())
            .field("on_entry", &self.on_entry.len())
            .field("on_exit", &self.on_exit.len())
            .field("on_error", &self.on_error.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::SpecificationBuilder;
    use crate::core::{Specification, UnknownStateError};
    use std::cmp::Ordering;

    fn review_spec() -> Specification<()> {
        SpecificationBuilder::new()
            .state("new", |s| s.event("submit", "awaiting_review"))
            .state("awaiting_review", |s| s.event("review", "being_reviewed"))
            .state("being_reviewed", |s| {
                s.event("accept", "accepted").event("reject", "rejected")
            })
            .state("accepted", |s| s)
            .state("rejected", |s| s)
            .build()
            .unwrap()
    }

    #[test]
    fn state_names_follow_definition_order() {
        let spec = review_spec();
        assert_eq!(
            spec.state_names(),
            vec!["new", "awaiting_review", "being_reviewed", "accepted", "rejected"]
        );
        assert_eq!(spec.initial_state().name(), "new");
    }

    #[test]
    fn unknown_state_lookup_fails() {
        let spec = review_spec();
        assert_eq!(
            spec.state("archived").unwrap_err(),
            UnknownStateError::new("archived")
        );
        assert!(spec.events_of("archived").is_err());
        assert!(!spec.contains("archived"));
    }

    #[test]
    fn events_of_terminal_state_is_empty() {
        let spec = review_spec();
        assert!(spec.events_of("accepted").unwrap().is_empty());
        assert_eq!(spec.events_of("being_reviewed").unwrap().len(), 2);
    }

    #[test]
    fn event_names_span_all_states() {
        let spec = review_spec();
        let names: Vec<&str> = spec.event_names().into_iter().collect();
        assert_eq!(names, vec!["accept", "reject", "review", "submit"]);
    }

    #[test]
    fn compare_uses_ordinals() {
        let spec = review_spec();
        assert_eq!(spec.ordinal("being_reviewed").unwrap(), 2);
        assert_eq!(spec.compare("new", "accepted").unwrap(), Ordering::Less);
        assert_eq!(spec.compare("rejected", "accepted").unwrap(), Ordering::Greater);
        assert!(spec.compare("new", "nowhere").is_err());
    }

    #[test]
    fn graph_exports_every_edge() {
        let spec = review_spec();
        let graph = spec.graph();

        assert_eq!(graph.initial, "new");
        assert_eq!(graph.states.len(), 5);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.states[2].events[1].transitions_to, "rejected");
    }
}
