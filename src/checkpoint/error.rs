//! Checkpoint error types.

use thiserror::Error;

/// Errors raised while saving or resuming a machine checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Encoding to JSON or bincode failed
    #[error("Checkpoint encoding failed: {0}")]
    SerializationFailed(String),

    /// Decoding from JSON or bincode failed
    #[error("Checkpoint decoding failed: {0}")]
    DeserializationFailed(String),

    /// Written by an incompatible format revision
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint does not fit the specification it is resumed against
    #[error("Checkpoint does not match specification: {0}")]
    ValidationFailed(String),

    /// The host refused to store the checkpointed state
    #[error("Restoring state failed: {0}")]
    RestoreFailed(String),
}
