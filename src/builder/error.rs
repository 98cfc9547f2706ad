//! Build errors for specification builders.

use thiserror::Error;

/// A single structural problem found while compiling a specification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No states declared. Add at least one state before .build()")]
    NoStates,

    #[error("State declared with an empty name")]
    EmptyStateName,

    #[error("Event declared with an empty name on state '{state}'")]
    EmptyEventName { state: String },

    #[error("State '{name}' is declared more than once")]
    DuplicateState { name: String },

    #[error("Event '{event}' on state '{state}' transitions to undeclared state '{target}'")]
    UnknownTarget {
        state: String,
        event: String,
        target: String,
    },

    #[error("Event '{event}' on state '{state}' has a named guard without a name")]
    MalformedGuard { state: String, event: String },
}

/// Every problem found in one specification.
///
/// The builder validates the whole definition before failing, so all
/// problems are reported together.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid specification: {}", summarize(.errors))]
pub struct BuildErrors {
    errors: Vec<BuildError>,
}

impl BuildErrors {
    pub(crate) fn new(errors: Vec<BuildError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[BuildError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn contains(&self, error: &BuildError) -> bool {
        self.errors.contains(error)
    }
}

impl IntoIterator for BuildErrors {
    type Item = BuildError;
    type IntoIter = std::vec::IntoIter<BuildError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

fn summarize(errors: &[BuildError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_every_error() {
        let errors = BuildErrors::new(vec![
            BuildError::NoStates,
            BuildError::DuplicateState {
                name: "draft".to_string(),
            },
        ]);

        let message = errors.to_string();
        assert!(message.starts_with("Invalid specification: "));
        assert!(message.contains("No states declared"));
        assert!(message.contains("'draft' is declared more than once"));
        assert_eq!(errors.len(), 2);
    }
}
