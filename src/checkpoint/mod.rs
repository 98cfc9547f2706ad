//! Checkpoint and resume for machines.
//!
//! A checkpoint captures the current state name, the transition history and
//! the machine configuration so a machine can be rebuilt after a restart.
//! Hooks and guards are code and are never part of a checkpoint; they come
//! from the specification the checkpoint is resumed against.

use crate::core::{Specification, StateHistory};
use crate::engine::MachineConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Name of the current state
    pub current_state: String,

    /// Committed transitions
    pub history: StateHistory,

    /// Settings of the checkpointed machine
    pub config: MachineConfig,
}

impl Checkpoint {
    pub fn new(current_state: impl Into<String>, history: StateHistory) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            current_state: current_state.into(),
            history,
            config: MachineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Check the checkpoint can be resumed against `spec`.
    pub fn validate<H, A>(&self, spec: &Specification<H, A>) -> Result<(), CheckpointError> {
        self.check_version()?;
        if !spec.contains(&self.current_state) {
            return Err(CheckpointError::ValidationFailed(format!(
                "state '{}' is not declared",
                self.current_state
            )));
        }
        Ok(())
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionRecord;

    fn checkpoint() -> Checkpoint {
        let history = StateHistory::new().record(TransitionRecord {
            from: "new".to_string(),
            to: "awaiting_review".to_string(),
            event: "submit".to_string(),
            timestamp: Utc::now(),
        });
        Checkpoint::new("awaiting_review", history)
    }

    #[test]
    fn json_encoding_is_lossless() {
        let original = checkpoint();
        let restored = Checkpoint::from_json(&original.to_json().unwrap()).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn binary_encoding_is_lossless() {
        let original = checkpoint();
        let restored = Checkpoint::from_bytes(&original.to_bytes().unwrap()).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut stale = checkpoint();
        stale.version = 99;
        let json = stale.to_json().unwrap();

        let result = Checkpoint::from_json(&json);
        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion {
                found: 99,
                supported: CHECKPOINT_VERSION
            })
        ));
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(matches!(
            Checkpoint::from_json("not json"),
            Err(CheckpointError::DeserializationFailed(_))
        ));
        assert!(matches!(
            Checkpoint::from_bytes(&[1, 2, 3]),
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn config_travels_with_the_checkpoint() {
        let config = MachineConfig::default().without_history();
        let original = checkpoint().with_config(config.clone());

        let restored = Checkpoint::from_bytes(&original.to_bytes().unwrap()).unwrap();
        assert_eq!(restored.config, config);
        assert_eq!(checkpoint().config, MachineConfig::default());
    }

    #[test]
    fn every_checkpoint_gets_a_fresh_id() {
        assert_ne!(checkpoint().id, checkpoint().id);
    }
}
