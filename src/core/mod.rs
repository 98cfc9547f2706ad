//! Core data model of the state machine.
//!
//! This module contains the immutable graph and the values passed around
//! while an event fires:
//! - [`Specification`], [`State`] and [`Event`] form the compiled graph
//! - [`Guard`] predicates select between same-named events
//! - [`TransitionContext`] tracks a single fire attempt
//! - [`StateHistory`] records committed transitions

mod context;
mod error;
mod event;
mod graph;
mod guard;
mod history;
mod hook;
mod specification;
mod state;

use std::collections::BTreeMap;

pub use context::TransitionContext;
pub use error::UnknownStateError;
pub use event::Event;
pub use graph::{EventEdge, SpecificationGraph, StateNode};
pub use guard::Guard;
pub use history::{StateHistory, TransitionRecord};
pub use hook::{ErrorHook, Hook, HookError, HookResult, StateHook};
pub use specification::Specification;
pub use state::State;

pub(crate) use hook::run_all;

/// Opaque key/value metadata attached to states and events.
pub type Metadata = BTreeMap<String, serde_json::Value>;
