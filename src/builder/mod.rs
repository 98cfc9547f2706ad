//! Builder API for declaring specifications.
//!
//! This module compiles a declarative description of states, events,
//! guards, actions and metadata into an immutable
//! [`Specification`](crate::core::Specification). Building never touches a
//! host instance.

pub mod error;
pub mod event;
pub mod specification;
pub mod state;

pub use error::{BuildError, BuildErrors};
pub use event::EventBuilder;
pub use specification::SpecificationBuilder;
pub use state::StateBuilder;
