//! Per-attempt bookkeeping for a single event fire.

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Ephemeral record of one event-fire attempt.
///
/// Created when the event has been resolved and discarded when the fire call
/// returns. Hooks read the source, target and arguments from it and use it to
/// halt the transition.
pub struct TransitionContext<'a, A> {
    from: &'a str,
    to: &'a str,
    event: &'a str,
    args: &'a A,
    started_at: DateTime<Utc>,
    halted: bool,
    raising: bool,
    reason: Option<String>,
}

impl<'a, A> TransitionContext<'a, A> {
    pub(crate) fn new(from: &'a str, to: &'a str, event: &'a str, args: &'a A) -> Self {
        Self {
            from,
            to,
            event,
            args,
            started_at: Utc::now(),
            halted: false,
            raising: false,
            reason: None,
        }
    }

    /// Name of the state the transition leaves.
    pub fn from(&self) -> &'a str {
        self.from
    }

    /// Name of the state the transition enters.
    pub fn to(&self) -> &'a str {
        self.to
    }

    /// Name of the fired event.
    pub fn event(&self) -> &'a str {
        self.event
    }

    /// Arguments passed by the caller of `fire`.
    pub fn args(&self) -> &'a A {
        self.args
    }

    /// When the attempt started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time elapsed since the attempt started.
    pub fn elapsed(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Abort the transition without a reason. The fire call returns normally.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Abort the transition, recording why.
    pub fn halt_because(&mut self, reason: impl Into<String>) {
        self.halted = true;
        self.reason = Some(reason.into());
    }

    /// Abort the transition and surface it to the caller as an error.
    pub fn raise_halt(&mut self) {
        self.halted = true;
        self.raising = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn halted_because(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub(crate) fn is_raising(&self) -> bool {
        self.raising
    }

    pub(crate) fn take_reason(&mut self) -> Option<String> {
        self.reason.take()
    }
}

impl<A> fmt::Debug for TransitionContext<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionContext")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("event", &self.event)
            .field("started_at", &self.started_at)
            .field("halted", &self.halted)
            .field("raising", &self.raising)
            .field("reason", &self.reason)
            .finish()
    }
}
