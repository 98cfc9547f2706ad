//! Transition engine.
//!
//! Fires events against a host: resolves the event through the guard chain,
//! runs the hooks in their fixed order, commits the new state through the
//! host binding and reports halts and failures.
//!
//! The free functions in this module work on any `&Specification` and host;
//! [`Machine`] pairs a shared specification with one host and tracks halts
//! and history across calls.

pub mod config;
mod fire;
mod machine;
mod outcome;

pub use config::MachineConfig;
pub use fire::{can_fire, current_state, fire, resolve};
pub use machine::Machine;
pub use outcome::{FireError, FireOutcome, TransitionFailure};
