//! Transition history tracking.
//!
//! Keeps an immutable record of committed transitions. Halted and failed
//! fires are never recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use stateflow::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "new".to_string(),
///     to: "awaiting_review".to_string(),
///     event: "submit".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.event, "submit");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being transitioned from
    pub from: String,
    /// The state being transitioned to
    pub to: String,
    /// The event that caused the transition
    pub event: String,
    /// When the new state was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition appended.
///
/// # Example
///
/// ```rust
/// use stateflow::core::{StateHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let history = StateHistory::new().record(TransitionRecord {
///     from: "new".to_string(),
///     to: "awaiting_review".to_string(),
///     event: "submit".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec!["new", "awaiting_review"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<TransitionRecord>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: TransitionRecord) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Keep only the newest `limit` records.
    pub fn truncated(&self, limit: usize) -> Self {
        let skip = self.transitions.len().saturating_sub(limit);
        Self {
            transitions: self.transitions[skip..].to_vec(),
        }
    }

    /// Names of the states traversed: the first source, then every target.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(first.from.as_str());
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Append in place, dropping the oldest records beyond `limit`.
    pub(crate) fn push(&mut self, transition: TransitionRecord, limit: Option<usize>) {
        self.transitions.push(transition);
        if let Some(limit) = limit {
            self.truncate_to(limit);
        }
    }

    pub(crate) fn truncate_to(&mut self, limit: usize) {
        let excess = self.transitions.len().saturating_sub(limit);
        self.transitions.drain(..excess);
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` if nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
