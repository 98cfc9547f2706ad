//! A host paired with its shared specification.

use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::core::{Specification, State, StateHistory, TransitionRecord};
use crate::engine::config::MachineConfig;
use crate::engine::fire;
use crate::engine::outcome::{FireError, FireOutcome};
use crate::host::HostBinding;
use chrono::Utc;
use std::fmt;
use std::sync::Arc;

/// State machine attached to one host.
///
/// The specification is shared; the host owns the current state. Fire calls
/// on one machine must not overlap, which `&mut self` already guarantees.
pub struct Machine<H, A = ()> {
    spec: Arc<Specification<H, A>>,
    host: H,
    config: MachineConfig,
    history: StateHistory,
    halted: bool,
    halted_because: Option<String>,
}

impl<H, A> Machine<H, A>
where
    H: HostBinding<A>,
{
    pub fn new(spec: Arc<Specification<H, A>>, host: H) -> Self {
        Self::with_config(spec, host, MachineConfig::default())
    }

    pub fn with_config(spec: Arc<Specification<H, A>>, host: H, config: MachineConfig) -> Self {
        Self {
            spec,
            host,
            config,
            history: StateHistory::new(),
            halted: false,
            halted_because: None,
        }
    }

    /// Rebuild a machine from a checkpoint, committing its state to the host.
    ///
    /// The machine keeps the configuration it was checkpointed with.
    pub fn resume(
        spec: Arc<Specification<H, A>>,
        host: H,
        checkpoint: Checkpoint,
    ) -> Result<Self, CheckpointError> {
        let config = checkpoint.config.clone();
        Self::resume_with_config(spec, host, checkpoint, config)
    }

    /// Rebuild a machine from a checkpoint under a new configuration.
    pub fn resume_with_config(
        spec: Arc<Specification<H, A>>,
        mut host: H,
        checkpoint: Checkpoint,
        config: MachineConfig,
    ) -> Result<Self, CheckpointError> {
        checkpoint.validate(&*spec)?;
        host.store_state(&checkpoint.current_state)
            .map_err(|e| CheckpointError::RestoreFailed(e.to_string()))?;

        let mut history = checkpoint.history;
        if let Some(limit) = config.history_limit {
            history.truncate_to(limit);
        }
        tracing::debug!(
            checkpoint = %checkpoint.id,
            state = %checkpoint.current_state,
            records = history.len(),
            "resumed machine"
        );

        let mut machine = Self::with_config(spec, host, config);
        machine.history = history;
        Ok(machine)
    }

    pub fn specification(&self) -> &Arc<Specification<H, A>> {
        &self.spec
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// The host's current state.
    pub fn current_state(&self) -> &State<H, A> {
        fire::current_state(&self.spec, &self.host)
    }

    pub fn is_in(&self, state: &str) -> bool {
        self.current_state().name() == state
    }

    /// Whether `event` would be accepted right now. Runs guards only.
    pub fn can_fire(&self, event: &str, args: &A) -> bool {
        fire::can_fire(&self.spec, &self.host, event, args)
    }

    /// Fire `event`.
    ///
    /// A non-raising halt comes back as `Ok(FireOutcome::Halted { .. })`;
    /// use [`fire_strict`](Self::fire_strict) to turn it into an error.
    pub fn fire(&mut self, event: &str, args: &A) -> Result<FireOutcome, FireError> {
        self.halted = false;
        self.halted_because = None;

        let result = fire::fire(&self.spec, &mut self.host, event, args);
        match &result {
            Ok(FireOutcome::Transitioned { from, to, event }) => self.record(from, to, event),
            Err(FireError::Failed(failure)) if failure.committed => {
                self.record(&failure.from, &failure.to, &failure.event)
            }
            Ok(FireOutcome::Halted { reason, .. }) | Err(FireError::Halted { reason }) => {
                self.halted = true;
                self.halted_because = reason.clone();
            }
            _ => {}
        }
        result
    }

    /// Fire `event`, treating any halt as an error.
    pub fn fire_strict(&mut self, event: &str, args: &A) -> Result<FireOutcome, FireError> {
        self.fire(event, args)?.into_result()
    }

    /// Whether the last fire call was halted.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Reason given by the last halt, if any.
    pub fn halted_because(&self) -> Option<&str> {
        self.halted_because.as_deref()
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Snapshot the current state, history and configuration.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.current_state().name(), self.history.clone())
            .with_config(self.config.clone())
    }

    fn record(&mut self, from: &str, to: &str, event: &str) {
        if !self.config.record_history {
            return;
        }

        let record = TransitionRecord {
            from: from.to_owned(),
            to: to.to_owned(),
            event: event.to_owned(),
            timestamp: Utc::now(),
        };
        self.history.push(record, self.config.history_limit);
    }
}

impl<H: fmt::Debug, A> fmt::Debug for Machine<H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("host", &self.host)
            .field("config", &self.config)
            .field("history", &self.history)
            .field("halted", &self.halted)
            .field("halted_because", &self.halted_because)
            .finish_non_exhaustive()
    }
}
