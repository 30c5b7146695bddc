//! Core types of the dispatch engine.
//!
//! - State and event numbers (`StateId`, `EventId`)
//! - The descriptor language tables are compiled from
//! - Handler and logger callables
//! - A recording logger sink
//!
//! Nothing in this module allocates per-instance state; an instance is just
//! a `StateId` owned by the caller.

pub mod descriptor;
mod handler;
mod history;
mod ids;

pub use descriptor::DescriptorEntry;
pub use handler::{Handler, Logger};
pub use history::{TransitionLog, TransitionRecord};
pub use ids::{EventId, StateId, NONE_NAME};

/// Numbers that can be labelled in a description.
///
/// Implemented by [`StateId`] and [`EventId`]; used by
/// [`numbered_enum!`](crate::numbered_enum) to emit label descriptors.
pub trait Label: Copy {
    fn label<C>(self, name: &'static str) -> DescriptorEntry<C>;
}

impl Label for StateId {
    fn label<C>(self, name: &'static str) -> DescriptorEntry<C> {
        descriptor::state(self, name)
    }
}

impl Label for EventId {
    fn label<C>(self, name: &'static str) -> DescriptorEntry<C> {
        descriptor::event(self, name)
    }
}
