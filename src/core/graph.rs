//! Serializable view of a specification for diagram renderers.

use super::Metadata;
use serde::{Deserialize, Serialize};

/// States and edges of a specification, without any executable parts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecificationGraph {
    /// Name of the initial state
    pub initial: String,

    /// States in definition order
    pub states: Vec<StateNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateNode {
    pub name: String,
    pub ordinal: usize,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    pub events: Vec<EventEdge>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventEdge {
    pub name: String,
    pub transitions_to: String,

    /// Number of guards on this declaration
    pub guards: usize,

    /// Whether an inline action was declared
    pub has_action: bool,

    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl SpecificationGraph {
    /// Total number of event declarations.
    pub fn edge_count(&self) -> usize {
        self.states.iter().map(|state| state.events.len()).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
