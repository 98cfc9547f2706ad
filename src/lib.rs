//! Stateflow: a finite state machine with strictly ordered transition hooks
//!
//! A [`Specification`] describes the states of a host type, the events leaving
//! each state, their guards and actions, and the callbacks that run around
//! every transition. It is compiled once and shared. The host object keeps its
//! own current state and exposes it through [`HostBinding`]; a [`Machine`]
//! pairs the two and fires events.
//!
//! # Core Concepts
//!
//! - **Specification**: immutable graph of states and events, built with
//!   [`SpecificationBuilder`]
//! - **Guards**: predicates selecting between same-named events
//! - **Hooks**: callbacks at fixed points of the transition protocol
//! - **Halts**: aborting a transition from a hook without changing state
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use stateflow::{HostBinding, HookResult, Machine, SpecificationBuilder, StateCell};
//!
//! #[derive(Default)]
//! struct Flashlight {
//!     battery: u8,
//!     state: StateCell,
//! }
//!
//! impl HostBinding for Flashlight {
//!     fn load_state(&self) -> Option<String> {
//!         self.state.get().map(str::to_owned)
//!     }
//!
//!     fn store_state(&mut self, state: &str) -> HookResult {
//!         self.state.set(state);
//!         Ok(())
//!     }
//! }
//!
//! let spec = SpecificationBuilder::<Flashlight>::new()
//!     .state("off", |s| {
//!         s.event_with("turn_on", "on", |e| e.when(|light, _| light.battery > 10))
//!             .event_with("turn_on", "low_battery", |e| e.when(|light, _| light.battery > 0))
//!     })
//!     .state("on", |s| s.event("turn_off", "off"))
//!     .state("low_battery", |s| s.event("turn_off", "off"))
//!     .build()
//!     .unwrap();
//!
//! let light = Flashlight { battery: 5, ..Default::default() };
//! let mut machine = Machine::new(Arc::new(spec), light);
//!
//! machine.fire("turn_on", &()).unwrap();
//! assert!(machine.is_in("low_battery"));
//! assert!(machine.can_fire("turn_off", &()));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod engine;
pub mod host;

// Re-export commonly used types
pub use crate::builder::{BuildError, BuildErrors, SpecificationBuilder};
pub use crate::core::{
    Guard, HookError, HookResult, Specification, State, StateHistory, TransitionContext,
    UnknownStateError,
};
pub use crate::engine::{FireError, FireOutcome, Machine, MachineConfig, TransitionFailure};
pub use crate::host::{HostBinding, StateCell};
