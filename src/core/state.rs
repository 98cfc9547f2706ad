//! States: the named nodes of a specification.
//!
//! A state knows its position in definition order, the events leaving it and
//! optional metadata. Comparison operators work purely on that position: a
//! state declared later compares greater, which says nothing about whether it
//! is "further along" in any business sense.

use super::event::Event;
use super::hook::StateHook;
use super::Metadata;
use std::cmp::Ordering;
use std::fmt;

/// A node of the specification graph.
pub struct State<H, A> {
    pub(crate) name: String,
    pub(crate) ordinal: usize,
    pub(crate) events: Vec<Event<H, A>>,
    pub(crate) metadata: Metadata,
    pub(crate) on_entry: Vec<StateHook<H, A>>,
    pub(crate) on_exit: Vec<StateHook<H, A>>,
}

impl<H, A> State<H, A> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position in definition order, starting at zero.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Events declared on this state, in declaration order.
    pub fn events(&self) -> &[Event<H, A>] {
        &self.events
    }

    /// Every declaration of `name` on this state, in declaration order.
    pub fn events_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s Event<H, A>> + 's {
        self.events.iter().filter(move |event| event.name == name)
    }

    /// Distinct event names, in order of first declaration.
    pub fn event_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for event in &self.events {
            if !names.contains(&event.name.as_str()) {
                names.push(&event.name);
            }
        }
        names
    }

    pub fn has_event(&self, name: &str) -> bool {
        self.events.iter().any(|event| event.name == name)
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Whether no event leaves this state.
    pub fn is_terminal(&self) -> bool {
        self.events.is_empty()
    }

    /// `low <= self <= high` by ordinal.
    pub fn between(&self, low: &Self, high: &Self) -> bool {
        low <= self && self <= high
    }
}

impl<H, A> PartialEq for State<H, A> {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal == other.ordinal && self.name == other.name
    }
}

impl<H, A> PartialOrd for State<H, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.ordinal.cmp(&other.ordinal) {
            // same slot, different name: states of two unrelated specifications
            Ordering::Equal if self.name != other.name => None,
            ordering => Some(ordering),
        }
    }
}

impl<H, A> fmt::Display for State<H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<H, A> fmt::Debug for State<H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("ordinal", &self.ordinal)
            .field("events", &self.events)
            .field("metadata", &self.metadata)
            .field("on_entry", &self.on_entry.len())
            .field("on_exit", &self.on_exit.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(name: &str, ordinal: usize) -> State<(), ()> {
        State {
            name: name.to_string(),
            ordinal,
            events: Vec::new(),
            metadata: Metadata::new(),
            on_entry: Vec::new(),
            on_exit: Vec::new(),
        }
    }

    fn event(name: &str, target: &str) -> Event<(), ()> {
        Event {
            name: name.to_string(),
            transitions_to: target.to_string(),
            guards: Vec::new(),
            action: None,
            metadata: Metadata::new(),
        }
    }

    #[test]
    fn states_order_by_ordinal() {
        let a = state("a", 0);
        let b = state("b", 1);
        let c = state("c", 2);

        assert!(a < b);
        assert!(b < c);
        assert!(a <= a);
        assert!(c > a);
        assert!(c >= b);
        assert!(!(c < a));
    }

    #[test]
    fn between_is_inclusive() {
        let a = state("a", 0);
        let b = state("b", 1);
        let c = state("c", 2);

        assert!(a.between(&a, &c));
        assert!(b.between(&a, &c));
        assert!(c.between(&a, &c));
        assert!(!a.between(&b, &c));
    }

    #[test]
    fn unrelated_states_with_same_ordinal_are_incomparable() {
        let a = state("a", 0);
        let x = state("x", 0);

        assert_eq!(a.partial_cmp(&x), None);
        assert!(a != x);
    }

    #[test]
    fn event_names_are_deduplicated_in_order() {
        let mut s = state("off", 0);
        s.events = vec![event("turn_on", "on"), event("turn_on", "low"), event("break", "broken")];

        assert_eq!(s.event_names(), vec!["turn_on", "break"]);
        assert_eq!(s.events_named("turn_on").count(), 2);
        assert!(s.has_event("break"));
        assert!(!s.has_event("repair"));
        assert!(!s.is_terminal());
    }

    #[test]
    fn state_without_events_is_terminal() {
        assert!(state("done", 3).is_terminal());
    }
}
