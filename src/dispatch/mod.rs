//! Runtime side of the engine: the built table and dispatch over it.
//!
//! A [`TransitionTable`] is write-once. After it is built it can be shared
//! freely; every instance it drives is a caller-owned [`StateId`], and the
//! caller serializes `step`/`enter` calls per instance.
//!
//! Out-of-range states and events are caller bugs: every entry point checks
//! them and panics with the table name and limits.

mod dispatcher;
mod inspect;
mod table;

pub use dispatcher::Dispatch;
pub use inspect::{TableSummary, TransitionRef};
pub use table::TransitionTable;

pub(crate) use table::{IndexBuffer, StateRecord};
