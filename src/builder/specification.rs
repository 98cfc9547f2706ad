//! Builder for constructing specifications.

use crate::builder::error::{BuildError, BuildErrors};
use crate::builder::event::EventBuilder;
use crate::builder::state::StateBuilder;
use crate::core::{
    ErrorHook, Hook, HookError, HookResult, Specification, State, StateHook, TransitionContext,
};
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<BuildError>>;

/// Builder for compiling a declarative state graph into a [`Specification`].
///
/// States are declared in order; the first one is the initial state.
/// Callbacks registered here apply to every transition of the specification.
///
/// # Example
///
/// ```rust
/// use stateflow::builder::SpecificationBuilder;
/// use stateflow::core::Specification;
///
/// let spec: Specification<()> = SpecificationBuilder::new()
///     .state("new", |s| s.event("submit", "awaiting_review"))
///     .state("awaiting_review", |s| s.event("review", "being_reviewed"))
///     .state("being_reviewed", |s| {
///         s.event("accept", "accepted").event("reject", "rejected")
///     })
///     .states(["accepted", "rejected"])
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.initial_state().name(), "new");
/// ```
pub struct SpecificationBuilder<H, A = ()> {
    states: Vec<StateBuilder<H, A>>,
    before_transition: Vec<Hook<H, A>>,
    on_transition: Vec<StateHook<H, A>>,
    after_transition: Vec<StateHook<H, A>>,
    on_entry: Vec<StateHook<H, A>>,
    on_exit: Vec<StateHook<H, A>>,
    on_error: Vec<ErrorHook<H, A>>,
}

impl<H, A> SpecificationBuilder<H, A> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            before_transition: Vec::new(),
            on_transition: Vec::new(),
            after_transition: Vec::new(),
            on_entry: Vec::new(),
            on_exit: Vec::new(),
            on_error: Vec::new(),
        }
    }

    /// Declare a state and configure its events.
    pub fn state<F>(mut self, name: impl Into<String>, configure: F) -> Self
    where
        F: FnOnce(StateBuilder<H, A>) -> StateBuilder<H, A>,
    {
        self.states.push(configure(StateBuilder::new(name)));
        self
    }

    /// Declare several states without events, in order.
    pub fn states<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states
            .extend(names.into_iter().map(StateBuilder::new));
        self
    }

    /// Run before the action. May halt the transition.
    pub fn before_transition<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H, &mut TransitionContext<'_, A>) -> HookResult + Send + Sync + 'static,
    {
        self.before_transition.push(Box::new(hook));
        self
    }

    /// Run after the action when the transition was not halted. Too late
    /// to halt; the context is read-only.
    pub fn on_transition<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H, &TransitionContext<'_, A>) -> HookResult + Send + Sync + 'static,
    {
        self.on_transition.push(Box::new(hook));
        self
    }

    /// Run last, after the new state is stored and entered.
    pub fn after_transition<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H, &TransitionContext<'_, A>) -> HookResult + Send + Sync + 'static,
    {
        self.after_transition.push(Box::new(hook));
        self
    }

    /// Run on entry to any state, after that state's own entry blocks.
    pub fn on_entry<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H, &TransitionContext<'_, A>) -> HookResult + Send + Sync + 'static,
    {
        self.on_entry.push(Box::new(hook));
        self
    }

    /// Run on exit from any state, after that state's own exit blocks.
    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H, &TransitionContext<'_, A>) -> HookResult + Send + Sync + 'static,
    {
        self.on_exit.push(Box::new(hook));
        self
    }

    /// Handle errors raised by the action, exit hooks or persistence.
    ///
    /// When at least one handler is registered and none of them fails, the
    /// error is considered handled and the host stays in the source state.
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H, &HookError, &TransitionContext<'_, A>) -> HookResult
            + Send
            + Sync
            + 'static,
    {
        self.on_error.push(Box::new(hook));
        self
    }

    /// Validate the whole definition, accumulating every problem.
    fn validate(&self) -> Check {
        let mut checks: Vec<Check> = Vec::new();

        if self.states.is_empty() {
            checks.push(Validation::fail(BuildError::NoStates));
        }

        let declared: HashSet<&str> = self.states.iter().map(|s| s.name.as_str()).collect();
        let mut seen: HashSet<&str> = HashSet::new();

        for state in &self.states {
            checks.push(ensure(!state.name.is_empty(), || BuildError::EmptyStateName));
            checks.push(ensure(seen.insert(&state.name), || {
                BuildError::DuplicateState {
                    name: state.name.clone(),
                }
            }));

            for event in &state.events {
                checks.push(ensure(!event.name().is_empty(), || {
                    BuildError::EmptyEventName {
                        state: state.name.clone(),
                    }
                }));
                checks.push(ensure(declared.contains(event.transitions_to()), || {
                    BuildError::UnknownTarget {
                        state: state.name.clone(),
                        event: event.name().to_string(),
                        target: event.transitions_to().to_string(),
                    }
                }));
                let malformed = event
                    .guards()
                    .iter()
                    .any(|guard| guard.name().is_some_and(str::is_empty));
                checks.push(ensure(!malformed, || BuildError::MalformedGuard {
                    state: state.name.clone(),
                    event: event.name().to_string(),
                }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the specification.
    /// Returns every structural problem if the definition is invalid.
    pub fn build(self) -> Result<Specification<H, A>, BuildErrors> {
        if let Validation::Failure(errors) = self.validate() {
            return Err(BuildErrors::new(errors.iter().cloned().collect()));
        }

        let mut index = HashMap::with_capacity(self.states.len());
        let mut states = Vec::with_capacity(self.states.len());
        for (ordinal, state) in self.states.into_iter().enumerate() {
            index.insert(state.name.clone(), ordinal);
            states.push(State {
                name: state.name,
                ordinal,
                events: state.events.into_iter().map(EventBuilder::build).collect(),
                metadata: state.metadata,
                on_entry: state.on_entry,
                on_exit: state.on_exit,
            });
        }

        tracing::debug!(states = states.len(), "specification built");

        Ok(Specification {
            states,
            index,
            before_transition: self.before_transition,
            on_transition: self.on_transition,
            after_transition: self.after_transition,
            on_entry: self.on_entry,
            on_exit: self.on_exit,
            on_error: self.on_error,
        })
    }
}

impl<H, A> Default for SpecificationBuilder<H, A> {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure(ok: bool, error: impl FnOnce() -> BuildError) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type Builder = SpecificationBuilder<(), ()>;

    #[test]
    fn builder_requires_states() {
        let result = Builder::new().build();

        let errors = result.unwrap_err();
        assert_eq!(errors.errors(), &[BuildError::NoStates]);
    }

    #[test]
    fn duplicate_state_is_rejected() {
        let result = Builder::new()
            .state("draft", |s| s.event("submit", "review"))
            .state("review", |s| s)
            .state("draft", |s| s)
            .build();

        let errors = result.unwrap_err();
        assert!(errors.contains(&BuildError::DuplicateState {
            name: "draft".to_string()
        }));
    }

    #[test]
    fn unknown_target_is_rejected() {
        let result = Builder::new()
            .state("draft", |s| s.event("submit", "reviw"))
            .state("review", |s| s)
            .build();

        let errors = result.unwrap_err();
        assert_eq!(
            errors.errors(),
            &[BuildError::UnknownTarget {
                state: "draft".to_string(),
                event: "submit".to_string(),
                target: "reviw".to_string(),
            }]
        );
    }

    #[test]
    fn builder_accumulates_all_errors() {
        let result = Builder::new()
            .state("", |s| s)
            .state("draft", |s| {
                s.event("", "draft")
                    .event("publish", "live")
                    .event_with("archive", "draft", |e| e.when_named(""))
            })
            .state("draft", |s| s)
            .build();

        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&BuildError::EmptyStateName));
        assert!(errors.contains(&BuildError::EmptyEventName {
            state: "draft".to_string()
        }));
        assert!(errors.contains(&BuildError::MalformedGuard {
            state: "draft".to_string(),
            event: "archive".to_string(),
        }));
        assert!(errors
            .errors()
            .iter()
            .any(|e| matches!(e, BuildError::UnknownTarget { target, .. } if target == "live")));
        assert!(errors
            .errors()
            .iter()
            .any(|e| matches!(e, BuildError::DuplicateState { .. })));
    }

    #[test]
    fn fluent_api_builds_specification() {
        let spec = Builder::new()
            .state("off", |s| {
                s.meta("label", "Off")
                    .event_with("turn_on", "on", |e| e.meta("cost", 1))
            })
            .state("on", |s| s.event("turn_off", "off"))
            .on_transition(|_, _| Ok(()))
            .on_error(|_, _, _| Ok(()))
            .build()
            .unwrap();

        assert_eq!(spec.state_names(), vec!["off", "on"]);
        let off = spec.state("off").unwrap();
        assert_eq!(off.metadata()["label"], json!("Off"));
        assert_eq!(off.events()[0].metadata()["cost"], json!(1));
        assert_eq!(spec.ordinal("on").unwrap(), 1);
        assert!(spec.handles_errors());
    }

    #[test]
    fn self_transitions_are_allowed() {
        let spec = Builder::new()
            .state("idle", |s| s.event("ping", "idle"))
            .build()
            .unwrap();

        assert_eq!(spec.events_of("idle").unwrap()[0].transitions_to(), "idle");
    }
}
