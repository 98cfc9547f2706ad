//! Results and errors of firing an event.

use crate::core::{HookError, UnknownStateError};
use thiserror::Error;

/// How a fire call that did not fail ended.
#[derive(Debug)]
pub enum FireOutcome {
    /// The new state was stored and every hook ran.
    Transitioned {
        from: String,
        to: String,
        event: String,
    },

    /// A hook halted the transition; the host is still in `from`.
    Halted {
        from: String,
        event: String,
        reason: Option<String>,
    },

    /// The action, an exit hook or persistence failed and `on_error`
    /// handled it; the host is still in `from`.
    Recovered {
        from: String,
        to: String,
        event: String,
        error: HookError,
    },
}

impl FireOutcome {
    pub fn is_transitioned(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }

    pub fn is_halted(&self) -> bool {
        matches!(self, Self::Halted { .. })
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered { .. })
    }

    pub fn halted_because(&self) -> Option<&str> {
        match self {
            Self::Halted { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }

    /// The state the host is in after the fire.
    pub fn state(&self) -> &str {
        match self {
            Self::Transitioned { to, .. } => to,
            Self::Halted { from, .. } | Self::Recovered { from, .. } => from,
        }
    }

    pub fn event(&self) -> &str {
        match self {
            Self::Transitioned { event, .. }
            | Self::Halted { event, .. }
            | Self::Recovered { event, .. } => event,
        }
    }

    /// Treat a halt as an error.
    pub fn into_result(self) -> Result<Self, FireError> {
        match self {
            Self::Halted { reason, .. } => Err(FireError::Halted { reason }),
            outcome => Ok(outcome),
        }
    }
}

/// Errors that end a fire call without a transition, or after a partial one.
#[derive(Debug, Error)]
pub enum FireError {
    /// The event is not declared on the current state, or every guard chain
    /// for it rejected the call.
    #[error("Event '{event}' cannot fire from state '{state}'")]
    NoSuchTransition { state: String, event: String },

    #[error(transparent)]
    UnknownState(#[from] UnknownStateError),

    /// A hook halted the transition and asked for it to be raised.
    #[error("Transition halted: {}", .reason.as_deref().unwrap_or("no reason given"))]
    Halted { reason: Option<String> },

    #[error(transparent)]
    Failed(#[from] TransitionFailure),
}

impl FireError {
    pub fn is_no_such_transition(&self) -> bool {
        matches!(self, Self::NoSuchTransition { .. })
    }

    /// Whether the host holds the target state despite the error.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Failed(failure) if failure.committed)
    }
}

/// Unexpected error raised while running a transition.
#[derive(Debug, Error)]
#[error("Transition '{event}' from '{from}' to '{to}' failed: {source}")]
pub struct TransitionFailure {
    pub from: String,
    pub to: String,
    pub event: String,

    /// The new state was already stored when the error was raised; it came
    /// from an entry hook or `after_transition`.
    pub committed: bool,

    #[source]
    pub source: HookError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halted_outcome_keeps_source_state() {
        let outcome = FireOutcome::Halted {
            from: "draft".to_string(),
            event: "publish".to_string(),
            reason: Some("needs approval".to_string()),
        };

        assert!(outcome.is_halted());
        assert_eq!(outcome.state(), "draft");
        assert_eq!(outcome.halted_because(), Some("needs approval"));
    }

    #[test]
    fn into_result_raises_halts_only() {
        let halted = FireOutcome::Halted {
            from: "draft".to_string(),
            event: "publish".to_string(),
            reason: None,
        };
        let transitioned = FireOutcome::Transitioned {
            from: "draft".to_string(),
            to: "live".to_string(),
            event: "publish".to_string(),
        };

        assert!(matches!(
            halted.into_result(),
            Err(FireError::Halted { reason: None })
        ));
        assert_eq!(transitioned.into_result().unwrap().state(), "live");
    }

    #[test]
    fn error_messages_name_the_transition() {
        let missing = FireError::NoSuchTransition {
            state: "draft".to_string(),
            event: "archive".to_string(),
        };
        assert_eq!(
            missing.to_string(),
            "Event 'archive' cannot fire from state 'draft'"
        );

        let halted = FireError::Halted { reason: None };
        assert_eq!(halted.to_string(), "Transition halted: no reason given");

        let failure = TransitionFailure {
            from: "draft".to_string(),
            to: "live".to_string(),
            event: "publish".to_string(),
            committed: false,
            source: "disk full".into(),
        };
        assert_eq!(
            failure.to_string(),
            "Transition 'publish' from 'draft' to 'live' failed: disk full"
        );
        assert!(std::error::Error::source(&failure).is_some());
        assert!(!FireError::from(failure).is_committed());
    }
}
