//! Errors raised by specification queries.

use thiserror::Error;

/// A state name was looked up that the specification does not declare.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown state '{name}'")]
pub struct UnknownStateError {
    pub name: String,
}

impl UnknownStateError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
