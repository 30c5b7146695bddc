//! Build errors for transition tables.

use crate::core::{EventId, StateId};
use thiserror::Error;

/// A single problem found in a transition description.
///
/// Positions are indexes into the descriptor slice handed to the builder.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("descriptor {position} ({kind}) uses reserved number 0")]
    Reserved0Used { position: usize, kind: &'static str },

    #[error("descriptor {position} declares a transition with no current state")]
    MissingCurrentState { position: usize },

    #[error("descriptor {position} uses {event} before it is declared")]
    EventUndeclared { position: usize, event: EventId },

    #[error("descriptor {position} targets {state}, outside 1..{limit}")]
    StateOutOfRange {
        position: usize,
        state: StateId,
        limit: usize,
    },

    #[error("table needs {required} index slots but the index width allows {capacity}")]
    DescriptorCapacityExceeded { required: usize, capacity: usize },

    #[error("{state} is within the table but never labelled")]
    UnnamedState { state: StateId },

    #[error("{event} is within the table but never labelled")]
    UnnamedEvent { event: EventId },

    #[error(
        "descriptor {position} redeclares the transition from {state} on {event} (first at {first})"
    )]
    DuplicateTransition {
        position: usize,
        first: usize,
        state: StateId,
        event: EventId,
    },
}

/// Errors that can occur when building a transition table.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("transition table '{table}' rejected with {} descriptor error(s)", .errors.len())]
    InvalidDescriptors {
        table: String,
        errors: Vec<DescriptorError>,
    },
}

impl BuildError {
    /// Every problem found in the description, in discovery order.
    pub fn errors(&self) -> &[DescriptorError] {
        match self {
            Self::InvalidDescriptors { errors, .. } => errors,
        }
    }
}
