//! Compiling transition descriptions into tables.
//!
//! Building runs in two passes. The [validator](validate) walks the
//! descriptors once, computing the table limits and collecting every error;
//! only a fully valid description reaches the second pass, which allocates
//! the dense index buffer and the name arrays and fills them in.

pub mod error;
pub mod macros;
mod options;
mod table;
mod validator;

pub use error::{BuildError, DescriptorError};
pub use options::{BuildOptions, DuplicatePolicy, IndexWidth};
pub use table::TableBuilder;
pub use validator::{validate, Limits};

use crate::core::DescriptorEntry;
use crate::dispatch::TransitionTable;

/// Build a table with default options.
///
/// # Example
///
/// ```
/// use fc_fsm::builder::build;
/// use fc_fsm::core::descriptor::{event, next, state};
/// use fc_fsm::core::{EventId, StateId};
///
/// const A: StateId = StateId::new(1);
/// const B: StateId = StateId::new(2);
/// const GO: EventId = EventId::new(1);
///
/// let descriptors = vec![event(GO, "go"), state(A, "A"), next(GO, B), state(B, "B")];
/// let table = build("example", &descriptors).unwrap();
///
/// let mut current = A;
/// table.step(&mut current, GO, &mut ());
/// assert_eq!(current, B);
/// ```
pub fn build<'d, C>(
    name: impl Into<String>,
    descriptors: &'d [DescriptorEntry<C>],
) -> Result<TransitionTable<'d, C>, BuildError> {
    TableBuilder::new(name).build(descriptors)
}
