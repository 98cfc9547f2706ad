//! The contract a host object satisfies to carry a state machine.
//!
//! The host owns its current-state value and decides how it is stored. The
//! engine reads it once per fire, writes it once on commit, and calls the
//! optional hook methods below. Every optional method defaults to a no-op, so
//! a host only overrides the hooks it cares about.

use crate::core::{HookResult, TransitionContext};
use serde::{Deserialize, Serialize};

/// Capability interface consumed by the transition engine.
///
/// `A` is the type of the arguments passed to `fire`.
pub trait HostBinding<A = ()> {
    /// Name of the current state. `None`, an empty name or a name unknown to
    /// the specification all mean "the initial state".
    fn load_state(&self) -> Option<String>;

    /// Commit a new current state. Called exactly once per successful fire.
    fn store_state(&mut self, state: &str) -> HookResult;

    /// Action for `event`, run when the event declares no inline action.
    fn run_action(&mut self, event: &str, ctx: &mut TransitionContext<'_, A>) -> HookResult {
        let _ = (event, ctx);
        Ok(())
    }

    /// Run after the state-scoped and specification-scoped exit hooks of `state`.
    fn exit_state(&mut self, state: &str, ctx: &TransitionContext<'_, A>) -> HookResult {
        let _ = (state, ctx);
        Ok(())
    }

    /// Run after the state-scoped and specification-scoped entry hooks of `state`.
    fn enter_state(&mut self, state: &str, ctx: &TransitionContext<'_, A>) -> HookResult {
        let _ = (state, ctx);
        Ok(())
    }

    /// Answer a named guard. `None` means the host has no such predicate.
    fn check_guard(&self, name: &str, args: &A) -> Option<bool> {
        let _ = (name, args);
        None
    }
}

/// In-memory current-state field hosts can embed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCell(Option<String>);

impl StateCell {
    /// An empty cell; the machine starts in the initial state.
    pub fn new() -> Self {
        Self(None)
    }

    pub fn with(state: impl Into<String>) -> Self {
        Self(Some(state.into()))
    }

    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn set(&mut self, state: impl Into<String>) {
        self.0 = Some(state.into());
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Door {
        state: StateCell,
    }

    impl HostBinding for Door {
        fn load_state(&self) -> Option<String> {
            self.state.get().map(str::to_owned)
        }

        fn store_state(&mut self, state: &str) -> HookResult {
            self.state.set(state);
            Ok(())
        }
    }

    #[test]
    fn state_cell_starts_empty() {
        let cell = StateCell::new();
        assert_eq!(cell.get(), None);
        assert_eq!(StateCell::with("open").get(), Some("open"));
    }

    #[test]
    fn state_cell_set_and_clear() {
        let mut cell = StateCell::new();
        cell.set("closed");
        assert_eq!(cell.get(), Some("closed"));
        cell.clear();
        assert_eq!(cell.get(), None);
    }

    #[test]
    fn default_hooks_are_no_ops() {
        let mut door = Door {
            state: StateCell::new(),
        };
        let mut ctx = TransitionContext::new("open", "closed", "close", &());

        assert!(door.run_action("close", &mut ctx).is_ok());
        assert!(door.exit_state("open", &ctx).is_ok());
        assert!(door.enter_state("closed", &ctx).is_ok());
        assert_eq!(door.check_guard("locked", &()), None);
        assert!(!ctx.is_halted());
        assert_eq!(door.load_state(), None);
    }

    #[test]
    fn store_then_load() {
        let mut door = Door {
            state: StateCell::new(),
        };
        door.store_state("closed").unwrap();
        assert_eq!(door.load_state().as_deref(), Some("closed"));
    }
}
